pub mod stabs;
