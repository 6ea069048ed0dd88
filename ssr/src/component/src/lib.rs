pub mod init_error;
pub mod loading;
pub mod next_button;
pub mod progress_bar;
pub mod video_player;
