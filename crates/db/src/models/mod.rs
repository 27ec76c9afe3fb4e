pub mod bug;
