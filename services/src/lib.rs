pub mod csv_import;
pub mod topic_service;
