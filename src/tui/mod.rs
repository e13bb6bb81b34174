pub mod app;

mod list_states;
mod recipe_states;
