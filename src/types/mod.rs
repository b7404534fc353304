pub mod by_player;
pub mod player_id;
