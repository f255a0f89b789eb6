mod game;
mod home;
mod result;
mod state;
mod status;

pub use game::GameView;
pub use home::HomeView;
pub use result::ResultView;
pub use state::use_session_snapshot;
pub use status::StatusView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
