pub mod d400_operations;
