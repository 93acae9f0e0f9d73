pub mod output_target;
