use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

use super::list_states::ItemBrowser;
use super::recipe_states::RecipeScreen;
use crate::controllers::RecipeClient;
use crate::list::{ItemList, filter_items};
use crate::models::{CategoryFilter, ShoppingItem};

pub enum AppAction {
    Continue, // Keep running
    Exit,     // Quit requested from the list screen
}

/// Colours for the current light/dark setting
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: Style,
    pub highlight: Style,
    pub muted: Style,
    pub error: Style,
    pub purchased: Style,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black).bg(Color::White),
            highlight: Style::default()
                .fg(Color::White)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray).bg(Color::White),
            error: Style::default().fg(Color::Red).bg(Color::White),
            purchased: Style::default()
                .fg(Color::Gray)
                .bg(Color::White)
                .add_modifier(Modifier::CROSSED_OUT),
        }
    }

    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray).bg(Color::DarkGray),
            error: Style::default().fg(Color::LightRed).bg(Color::DarkGray),
            purchased: Style::default()
                .fg(Color::Gray)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        }
    }
}

/// State shared by every screen
pub struct AppContext {
    pub items: ItemList,
    pub recipes: RecipeClient,
    pub search_query: String,
    pub filter: CategoryFilter,
    pub selected: usize, // index into the visible items
    pub dark_mode: bool,
    pub quit: bool,
}

impl AppContext {
    pub fn new(items: ItemList, recipes: RecipeClient) -> Self {
        Self {
            items,
            recipes,
            search_query: String::new(),
            filter: CategoryFilter::All,
            selected: 0,
            dark_mode: false,
            quit: false,
        }
    }

    pub fn visible_items(&self) -> Vec<&ShoppingItem> {
        filter_items(self.items.items(), &self.search_query, self.filter)
    }

    pub fn selected_item(&self) -> Option<&ShoppingItem> {
        self.visible_items().get(self.selected).copied()
    }

    /// Keep the selection inside the visible items after the view changes
    pub fn clamp_selection(&mut self) {
        let visible = self.visible_items().len();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }
}

pub(crate) trait Screen {
    fn render(&self, context: &AppContext, frame: &mut Frame);
    fn handle_key(&mut self, key: KeyCode, context: &mut AppContext) -> Option<Box<dyn Screen>>;

    /// Called once per frame before rendering
    fn tick(&mut self, _context: &mut AppContext) {}
}

pub struct ShoppingApp {
    screen: Box<dyn Screen>,
    context: AppContext,
}

impl ShoppingApp {
    pub fn new(items: ItemList, recipes: RecipeClient) -> Self {
        Self {
            screen: Box::new(ItemBrowser::new()),
            context: AppContext::new(items, recipes),
        }
    }

    /// Jump straight to the recipe screen; leaving it returns to the list
    pub fn open_recipe(&mut self, meal_id: &str) {
        self.screen = Box::new(RecipeScreen::open(meal_id, &self.context));
    }

    pub fn tick(&mut self) {
        self.screen.tick(&mut self.context);
    }

    pub fn render(&self, frame: &mut Frame) {
        self.screen.render(&self.context, frame);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        debug!(?key, "Key pressed");
        if let Some(next_screen) = self.screen.handle_key(key, &mut self.context) {
            self.screen = next_screen
        }

        if self.context.quit {
            AppAction::Exit
        } else {
            AppAction::Continue
        }
    }

    /// Consume the app once every queued list snapshot has been written
    /// Returns the number of items left on the list
    pub async fn shutdown(self) -> usize {
        self.context.items.flush().await;
        self.context.items.len()
    }
}
