mod game_vm;
mod home_vm;
mod result_vm;
mod screen;

pub use game_vm::{GameVm, map_game};
pub use home_vm::{EMPTY_ID_PROMPT, HomeVm, map_home, parse_user_id};
pub use result_vm::{ResultVm, map_result};
pub use screen::Screen;
