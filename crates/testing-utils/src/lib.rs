pub mod fs;
pub mod mock_repo;
