pub mod common;

mod test_multi_stage;
