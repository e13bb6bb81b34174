mod item_list;
mod save_worker;
mod view;

pub use item_list::ItemList;
pub use save_worker::SaveWorker;
pub use view::{filter_items, total_remaining};
