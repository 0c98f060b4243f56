pub mod dice;
pub mod player;
pub mod turn;
