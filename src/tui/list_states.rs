use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::info;

use super::app::{AppContext, Screen, Theme};
use super::recipe_states::RecipeScreen;
use crate::list::total_remaining;
use crate::models::{Category, ItemInput, ShoppingItem};

const BROWSER_HELP: &str = "↑/↓ select  space toggle  a add  e edit  d delete  \
                            C clear all  / search  f filter  t theme  r recipe  q quit";

fn item_line(item: &ShoppingItem, theme: &Theme) -> Line<'static> {
    let marker = if item.purchased { "[✓]" } else { "[ ]" };
    let name_style = if item.purchased {
        theme.purchased
    } else {
        theme.base.add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled(format!("{} ", marker), theme.base),
        Span::styled(item.name.clone(), name_style),
        Span::styled(format!("  {:.2} ฿", item.price), theme.base),
        Span::styled(format!("  {}", item.category), theme.muted),
    ];
    if let Some(image) = &item.image {
        spans.push(Span::styled(
            format!("  {}", image),
            theme.muted.add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

/// Draw the list screen with `footer` in the bottom bar
fn render_list_screen(context: &AppContext, frame: &mut Frame, footer: Line) {
    let theme = context.theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter and search
            Constraint::Min(1),    // Items
            Constraint::Length(3), // Total
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let mode = if context.dark_mode { "dark" } else { "light" };
    let header = Paragraph::new(format!(
        "Filter: {}   Search: {}",
        context.filter.label(),
        context.search_query
    ))
    .style(theme.base)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Shopping List ({} mode)", mode)),
    );
    frame.render_widget(header, chunks[0]);

    let visible = context.visible_items();
    let rows: Vec<ListItem> = visible
        .iter()
        .map(|item| ListItem::new(item_line(item, &theme)))
        .collect();
    let list = List::new(rows)
        .style(theme.base)
        .highlight_style(theme.highlight)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Items ({} of {})",
            visible.len(),
            context.items.len()
        )));
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(context.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let total = Paragraph::new(format!(
        "{:.2} ฿",
        total_remaining(context.items.items())
    ))
    .style(theme.base)
    .block(Block::default().borders(Borders::ALL).title("Total remaining"));
    frame.render_widget(total, chunks[2]);

    frame.render_widget(Paragraph::new(footer).style(theme.muted), chunks[3]);
}

pub(crate) struct ItemBrowser {
    message: Option<String>,
}

impl ItemBrowser {
    pub fn new() -> Self {
        Self { message: None }
    }
}

impl Screen for ItemBrowser {
    fn render(&self, context: &AppContext, frame: &mut Frame) {
        let footer = match &self.message {
            Some(message) => Line::styled(message.clone(), context.theme().error),
            None => Line::from(BROWSER_HELP),
        };
        render_list_screen(context, frame, footer);
    }

    fn handle_key(&mut self, key: KeyCode, context: &mut AppContext) -> Option<Box<dyn Screen>> {
        self.message = None;
        let visible = context.visible_items().len();

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                context.selected = context.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if context.selected + 1 < visible {
                    context.selected += 1;
                }
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = context.selected_item().map(|item| item.id.clone()) {
                    context.items.toggle_purchased(&id);
                }
                None
            }
            KeyCode::Char('a') => Some(Box::new(ItemForm::new_item())),
            KeyCode::Char('e') => match context.selected_item() {
                Some(item) => Some(Box::new(ItemForm::editing(item))),
                None => {
                    self.message = Some("Nothing selected to edit".to_string());
                    None
                }
            },
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = context.selected_item().map(|item| item.id.clone()) {
                    context.items.remove(&id);
                    context.clamp_selection();
                }
                None
            }
            KeyCode::Char('C') => {
                if context.items.is_empty() {
                    self.message = Some("The list is already empty".to_string());
                    None
                } else {
                    Some(Box::new(ConfirmClear))
                }
            }
            KeyCode::Char('/') => Some(Box::new(SearchInput)),
            KeyCode::Char('f') => {
                context.filter = context.filter.cycle();
                context.clamp_selection();
                None
            }
            KeyCode::Char('t') => {
                context.dark_mode = !context.dark_mode;
                None
            }
            KeyCode::Char('r') => Some(Box::new(MealIdPrompt::new())),
            KeyCode::Char('q') => {
                context.quit = true;
                None
            }
            _ => None,
        }
    }
}

pub(crate) struct SearchInput;

impl Screen for SearchInput {
    fn render(&self, context: &AppContext, frame: &mut Frame) {
        let footer = Line::from(vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(context.search_query.clone()),
            Span::raw("▏  (Enter to finish)"),
        ]);
        render_list_screen(context, frame, footer);
    }

    fn handle_key(&mut self, key: KeyCode, context: &mut AppContext) -> Option<Box<dyn Screen>> {
        match key {
            KeyCode::Char(c) => {
                context.search_query.push(c);
                context.clamp_selection();
                None
            }
            KeyCode::Backspace => {
                context.search_query.pop();
                context.clamp_selection();
                None
            }
            KeyCode::Enter | KeyCode::Esc => Some(Box::new(ItemBrowser::new())),
            _ => None,
        }
    }
}

pub(crate) struct ConfirmClear;

impl Screen for ConfirmClear {
    fn render(&self, context: &AppContext, frame: &mut Frame) {
        let footer = Line::styled(
            format!("Delete all {} items? (Y)es / (N)o", context.items.len()),
            context.theme().error.add_modifier(Modifier::BOLD),
        );
        render_list_screen(context, frame, footer);
    }

    fn handle_key(&mut self, key: KeyCode, context: &mut AppContext) -> Option<Box<dyn Screen>> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                context.items.clear_all();
                context.selected = 0;
                Some(Box::new(ItemBrowser::new()))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(Box::new(ItemBrowser::new()))
            }
            _ => None, // Ignore other keys
        }
    }
}

pub(crate) struct MealIdPrompt {
    current_input: String,
}

impl MealIdPrompt {
    pub fn new() -> Self {
        Self {
            current_input: String::new(),
        }
    }
}

impl Screen for MealIdPrompt {
    fn render(&self, context: &AppContext, frame: &mut Frame) {
        let footer = Line::from(vec![
            Span::styled("Recipe meal id: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.current_input.clone()),
            Span::raw("▏  (Enter to open, Esc to cancel)"),
        ]);
        render_list_screen(context, frame, footer);
    }

    fn handle_key(&mut self, key: KeyCode, context: &mut AppContext) -> Option<Box<dyn Screen>> {
        match key {
            KeyCode::Char(c) => {
                self.current_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let meal_id = self.current_input.trim();
                if meal_id.is_empty() {
                    Some(Box::new(ItemBrowser::new()))
                } else {
                    Some(Box::new(RecipeScreen::open(meal_id, context)))
                }
            }
            KeyCode::Esc => Some(Box::new(ItemBrowser::new())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Price,
    Category,
    Image,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Price,
        FormField::Category,
        FormField::Image,
    ];

    fn next(self) -> FormField {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> FormField {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Entry form shared by add and edit
pub(crate) struct ItemForm {
    editing: Option<String>, // id of the item being edited
    name: String,
    price: String,
    category: Category,
    image: String,
    focus: FormField,
    error_message: Option<String>,
}

impl ItemForm {
    pub fn new_item() -> Self {
        Self {
            editing: None,
            name: String::new(),
            price: String::new(),
            category: Category::default(),
            image: String::new(),
            focus: FormField::Name,
            error_message: None,
        }
    }

    pub fn editing(item: &ShoppingItem) -> Self {
        let input = ItemInput::from_item(item);
        Self {
            editing: Some(item.id.clone()),
            name: input.name,
            price: input.price,
            category: input.category,
            image: input.image.unwrap_or_default(),
            focus: FormField::Name,
            error_message: None,
        }
    }

    fn to_input(&self) -> ItemInput {
        ItemInput {
            name: self.name.clone(),
            price: self.price.clone(),
            category: self.category,
            image: Some(self.image.clone()),
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Price => Some(&mut self.price),
            FormField::Image => Some(&mut self.image),
            FormField::Category => None,
        }
    }

    fn submit(&mut self, context: &mut AppContext) -> Option<Box<dyn Screen>> {
        let input = self.to_input();
        let result = match &self.editing {
            Some(id) => context.items.edit(id, &input).map(|_| ()),
            None => context.items.add(&input).map(|_| ()),
        };

        match result {
            Ok(()) => {
                context.clamp_selection();
                Some(Box::new(ItemBrowser::new()))
            }
            Err(e) => {
                info!("Rejected item entry: {}", e);
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    fn field_block(&self, field: FormField, title: &str, theme: &Theme) -> Block<'static> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string());
        if self.focus == field {
            block.border_style(theme.highlight)
        } else {
            block.border_style(theme.base)
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: FormField,
        text: String,
        theme: &Theme,
    ) {
        let title = match field {
            FormField::Name => "Name",
            FormField::Price => "Price",
            FormField::Category => "Category (←/→)",
            FormField::Image => "Image URI (optional)",
        };
        let widget = Paragraph::new(text)
            .style(theme.base)
            .block(self.field_block(field, title, theme));
        frame.render_widget(widget, area);
    }
}

impl Screen for ItemForm {
    fn render(&self, context: &AppContext, frame: &mut Frame) {
        let theme = context.theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Name
                Constraint::Length(3), // Price
                Constraint::Length(3), // Category
                Constraint::Length(3), // Image
                Constraint::Min(0),
            ])
            .split(frame.area());

        let action = if self.editing.is_some() {
            "Edit item"
        } else {
            "Add item"
        };
        let title = match &self.error_message {
            Some(error) => Line::from(vec![
                Span::styled(format!("{} - ", action), theme.base),
                Span::styled(format!("ERROR: {}", error), theme.error),
            ]),
            None => Line::styled(
                format!("{} (Tab next field, Enter save, Esc cancel)", action),
                theme.base.add_modifier(Modifier::BOLD),
            ),
        };
        frame.render_widget(Paragraph::new(title).style(theme.base), chunks[0]);

        self.render_field(frame, chunks[1], FormField::Name, self.name.clone(), &theme);
        self.render_field(frame, chunks[2], FormField::Price, self.price.clone(), &theme);
        self.render_field(
            frame,
            chunks[3],
            FormField::Category,
            format!("◀ {} ▶", self.category),
            &theme,
        );
        self.render_field(frame, chunks[4], FormField::Image, self.image.clone(), &theme);
        frame.render_widget(Paragraph::new("").style(theme.base), chunks[5]);
    }

    fn handle_key(&mut self, key: KeyCode, context: &mut AppContext) -> Option<Box<dyn Screen>> {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Left if self.focus == FormField::Category => {
                self.category = self.category.previous();
                None
            }
            KeyCode::Right if self.focus == FormField::Category => {
                self.category = self.category.next();
                None
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                    self.error_message = None; // Clear error when user types
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                    self.error_message = None;
                }
                None
            }
            KeyCode::Enter => self.submit(context),
            KeyCode::Esc => Some(Box::new(ItemBrowser::new())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::controllers::{RecipeClient, save_items};
    use crate::list::ItemList;
    use crate::models::CategoryFilter;
    use crate::models::test_fixtures::sample_items;
    use crate::storage::MemoryStore;
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::*;

    async fn context_with(items: &[ShoppingItem]) -> AppContext {
        let store = Arc::new(MemoryStore::new());
        save_items(store.as_ref(), items)
            .await
            .expect("Failed to seed store");
        AppContext::new(
            ItemList::load(store).await,
            RecipeClient::new("http://127.0.0.1:9/api/json/v1/1"),
        )
    }

    fn type_text(screen: &mut dyn Screen, context: &mut AppContext, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c), context);
        }
    }

    fn screen_text(screen: &dyn Screen, context: &AppContext) -> String {
        let mut terminal =
            Terminal::new(TestBackend::new(120, 20)).expect("Failed to create terminal");
        terminal
            .draw(|frame| screen.render(context, frame))
            .expect("Failed to draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_item_through_form() {
        let mut context = context_with(&[]).await;
        let mut form = ItemForm::new_item();

        type_text(&mut form, &mut context, "Milk");
        form.handle_key(KeyCode::Tab, &mut context);
        type_text(&mut form, &mut context, "40");
        let next = form.handle_key(KeyCode::Enter, &mut context);

        assert!(next.is_some(), "Form should close after a valid entry");
        assert_eq!(context.items.len(), 1);
        let milk = &context.items.items()[0];
        assert_eq!(milk.name, "Milk");
        assert_eq!(milk.price, 40.0);
        assert_eq!(milk.category, Category::FreshFood);
        assert_eq!(milk.image, None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_invalid_price_keeps_form_open() {
        let mut context = context_with(&[]).await;
        let mut form = ItemForm::new_item();

        type_text(&mut form, &mut context, "Milk");
        form.handle_key(KeyCode::Tab, &mut context);
        type_text(&mut form, &mut context, "-5");
        let next = form.handle_key(KeyCode::Enter, &mut context);

        assert!(next.is_none(), "Form should stay open");
        assert!(context.items.is_empty());
        assert!(
            form.error_message
                .as_deref()
                .is_some_and(|e| e.contains("positive number"))
        );

        // Typing again clears the error
        form.handle_key(KeyCode::Backspace, &mut context);
        assert!(form.error_message.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_category_field_cycles_with_arrows() {
        let mut context = context_with(&[]).await;
        let mut form = ItemForm::new_item();

        form.handle_key(KeyCode::Tab, &mut context);
        form.handle_key(KeyCode::Tab, &mut context);
        assert_eq!(form.focus, FormField::Category);

        form.handle_key(KeyCode::Right, &mut context);
        assert_eq!(form.category, Category::Household);
        form.handle_key(KeyCode::Left, &mut context);
        form.handle_key(KeyCode::Left, &mut context);
        assert_eq!(form.category, Category::Sweets);

        // Characters are ignored on the category field
        form.handle_key(KeyCode::Char('x'), &mut context);
        assert!(form.name.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_form_prefills_and_saves(sample_items: Vec<ShoppingItem>) {
        let mut context = context_with(&sample_items).await;
        let mut form = ItemForm::editing(&sample_items[2]);
        assert_eq!(form.name, "Green Tea");
        assert_eq!(form.price, "20");

        form.handle_key(KeyCode::Tab, &mut context);
        form.handle_key(KeyCode::Backspace, &mut context);
        form.handle_key(KeyCode::Backspace, &mut context);
        type_text(&mut form, &mut context, "35");
        form.handle_key(KeyCode::Enter, &mut context);

        let tea = context.items.get("3").expect("Tea should still exist");
        assert_eq!(tea.price, 35.0);
        assert_eq!(context.items.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn test_browser_toggle_and_delete(sample_items: Vec<ShoppingItem>) {
        let mut context = context_with(&sample_items).await;
        let mut browser = ItemBrowser::new();

        browser.handle_key(KeyCode::Down, &mut context);
        browser.handle_key(KeyCode::Char(' '), &mut context);
        assert!(!context.items.get("2").expect("item 2").purchased);

        browser.handle_key(KeyCode::Down, &mut context);
        browser.handle_key(KeyCode::Down, &mut context);
        assert_eq!(context.selected, 2, "Selection stops at the last item");

        browser.handle_key(KeyCode::Char('d'), &mut context);
        assert_eq!(context.items.len(), 2);
        assert_eq!(context.selected, 1, "Selection moves back onto the list");
    }

    #[rstest]
    #[tokio::test]
    async fn test_search_and_filter(sample_items: Vec<ShoppingItem>) {
        let mut context = context_with(&sample_items).await;
        let mut search = SearchInput;

        type_text(&mut search, &mut context, "TEA");
        assert_eq!(context.visible_items().len(), 1);
        search.handle_key(KeyCode::Enter, &mut context);

        let mut browser = ItemBrowser::new();
        browser.handle_key(KeyCode::Char('f'), &mut context);
        assert_eq!(context.filter, CategoryFilter::Only(Category::FreshFood));
        assert!(context.visible_items().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_clear_all_needs_confirmation(sample_items: Vec<ShoppingItem>) {
        let mut context = context_with(&sample_items).await;
        let mut confirm = ConfirmClear;

        confirm.handle_key(KeyCode::Char('x'), &mut context);
        assert_eq!(context.items.len(), 3);

        confirm.handle_key(KeyCode::Char('n'), &mut context);
        assert_eq!(context.items.len(), 3);

        confirm.handle_key(KeyCode::Char('y'), &mut context);
        assert!(context.items.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_quit_and_theme_keys(sample_items: Vec<ShoppingItem>) {
        let mut context = context_with(&sample_items).await;
        let mut browser = ItemBrowser::new();

        browser.handle_key(KeyCode::Char('t'), &mut context);
        assert!(context.dark_mode);

        browser.handle_key(KeyCode::Char('q'), &mut context);
        assert!(context.quit);
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_screen_renders_items_and_total(sample_items: Vec<ShoppingItem>) {
        let context = context_with(&sample_items).await;

        let text = screen_text(&ItemBrowser::new(), &context);

        assert!(text.contains("Milk"));
        assert!(text.contains("Dish Soap"));
        assert!(text.contains("Total remaining"));
        assert!(text.contains("30.00"));
    }
}
