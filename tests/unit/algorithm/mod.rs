pub mod relaxation;
