pub mod a001_proposal;
