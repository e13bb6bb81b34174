use std::cell::Cell;

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{AppContext, Screen, Theme};
use super::list_states::ItemBrowser;
use crate::controllers::{RecipeFetch, RecipeStatus};
use crate::models::api::RecipeDetail;

const PAGE_LINES: u16 = 10;

/// Recipe detail for one meal id: loading, then success or not found
pub(crate) struct RecipeScreen {
    meal_id: String,
    fetch: Option<RecipeFetch>,
    status: RecipeStatus,
    scroll: u16,
    max_scroll: Cell<u16>, // measured on the last render
}

impl RecipeScreen {
    pub fn open(meal_id: &str, context: &AppContext) -> Self {
        Self {
            meal_id: meal_id.to_string(),
            fetch: Some(context.recipes.spawn_fetch(meal_id)),
            status: RecipeStatus::Loading,
            scroll: 0,
            max_scroll: Cell::new(0),
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll.get()));
        self.scroll = u16::try_from(target).unwrap_or(0);
    }

    /// Header, ingredients and instructions as one scrollable body
    fn recipe_lines(recipe: &RecipeDetail, theme: &Theme) -> Vec<Line<'static>> {
        let bold = theme.base.add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::styled(recipe.name.clone(), bold),
            Line::styled(format!("{} · {}", recipe.category, recipe.area), theme.base),
            Line::styled(recipe.thumbnail.clone(), theme.muted),
            Line::default(),
            Line::styled(format!("Ingredients ({})", recipe.ingredients.len()), bold),
        ];

        for ingredient in &recipe.ingredients {
            let mut spans = vec![Span::styled("• ", theme.base)];
            if let Some(measure) = ingredient.measure.as_deref().map(str::trim) {
                if !measure.is_empty() {
                    spans.push(Span::styled(format!("{} ", measure), theme.base));
                }
            }
            spans.push(Span::styled(ingredient.name.clone(), bold));
            lines.push(Line::from(spans));
            lines.push(Line::styled(format!("  {}", ingredient.image_url()), theme.muted));
        }

        lines.push(Line::default());
        lines.push(Line::styled("Instructions", bold));
        lines.extend(
            recipe
                .instructions
                .lines()
                .map(|step| Line::styled(step.to_string(), theme.base)),
        );
        lines
    }

    fn render_recipe(&self, recipe: &RecipeDetail, theme: &Theme, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());
        let body_area = chunks[0];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Recipe {}", self.meal_id));
        let inner = block.inner(body_area);
        let body = Paragraph::new(Self::recipe_lines(recipe, theme))
            .style(theme.base)
            .wrap(Wrap { trim: false });

        let total = u16::try_from(body.line_count(inner.width)).unwrap_or(u16::MAX);
        let max_scroll = total.saturating_sub(inner.height);
        self.max_scroll.set(max_scroll);

        let body = body.block(block).scroll((self.scroll.min(max_scroll), 0));
        frame.render_widget(body, body_area);
        frame.render_widget(
            Paragraph::new("↑/↓ scroll  PgUp/PgDn page  Esc back").style(theme.muted),
            chunks[1],
        );
    }
}

impl Screen for RecipeScreen {
    fn tick(&mut self, _context: &mut AppContext) {
        if let Some(fetch) = &mut self.fetch {
            if let Some(status) = fetch.try_outcome() {
                self.status = status;
                self.fetch = None;
            }
        }
    }

    fn render(&self, context: &AppContext, frame: &mut Frame) {
        let theme = context.theme();
        match &self.status {
            RecipeStatus::Loading => {
                let loading = Paragraph::new(format!("Loading recipe {}...", self.meal_id))
                    .style(theme.base)
                    .block(Block::default().borders(Borders::ALL).title("Recipe"));
                frame.render_widget(loading, frame.area());
            }
            RecipeStatus::NotFound => {
                let not_found = Paragraph::new(vec![
                    Line::styled(
                        format!("Recipe not found for meal id {}", self.meal_id),
                        theme.error.add_modifier(Modifier::BOLD),
                    ),
                    Line::styled("Esc to go back", theme.muted),
                ])
                .style(theme.base)
                .block(Block::default().borders(Borders::ALL).title("Recipe"));
                frame.render_widget(not_found, frame.area());
            }
            RecipeStatus::Success(recipe) => self.render_recipe(recipe, &theme, frame),
        }
    }

    fn handle_key(&mut self, key: KeyCode, _context: &mut AppContext) -> Option<Box<dyn Screen>> {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                if let Some(fetch) = self.fetch.take() {
                    fetch.cancel();
                }
                Some(Box::new(ItemBrowser::new()))
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_by(-1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_by(1);
                None
            }
            KeyCode::PageUp => {
                self.scroll_by(-i32::from(PAGE_LINES));
                None
            }
            KeyCode::PageDown => {
                self.scroll_by(i32::from(PAGE_LINES));
                None
            }
            KeyCode::Home => {
                self.scroll = 0;
                None
            }
            KeyCode::End => {
                self.scroll = self.max_scroll.get();
                None
            }
            _ => None,
        }
    }
}
