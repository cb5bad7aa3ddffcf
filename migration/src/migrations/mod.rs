pub mod m202601050001_create_tutors;
pub mod m202601050002_create_tutor_periods;
pub mod m202601050003_create_categories;
pub mod m202601050004_create_topics;
pub mod m202601050005_case_insensitive_names;
