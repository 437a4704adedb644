pub fn main() -> miette::Result<()> {
    hooksmith_cli::run()
}
