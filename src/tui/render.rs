use super::Screen;
use crate::place::PlaceResult;
use crate::provider::SearchProvider;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

impl<P: SearchProvider + 'static> Screen<P> {
    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // copy bar
                Constraint::Length(3), // query
                Constraint::Min(0),    // results
                Constraint::Length(1), // status
            ])
            .split(frame.area());

        let selected = self.model.selected_items().len();
        let copy_bar = Line::from(vec![
            Span::styled(" Copy ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(format!(" Ctrl+Y copies {} selected", selected)),
            Span::styled(
                "  Enter toggle  Esc quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(copy_bar), chunks[0]);

        let query = Paragraph::new(self.model.term().to_string())
            .block(Block::default().borders(Borders::ALL).title("Search..."));
        frame.render_widget(query, chunks[1]);
        // Keep the cursor inside the input borders however long the query is.
        let typed = u16::try_from(self.model.term().chars().count()).unwrap_or(u16::MAX);
        let offset = typed.min(chunks[1].width.saturating_sub(2));
        frame.set_cursor_position((
            chunks[1].x.saturating_add(1).saturating_add(offset),
            chunks[1].y.saturating_add(1),
        ));

        let rows: Vec<ListItem> = self
            .model
            .items()
            .iter()
            .map(|place| row(place, self.model.is_selected(place)))
            .collect();
        let list = List::new(rows)
            .block(Block::default().borders(Borders::ALL))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[2], &mut self.cursor);

        let status = Paragraph::new(self.status_line()).style(Style::default().fg(Color::Gray));
        frame.render_widget(status, chunks[3]);
    }
}

fn row(place: &PlaceResult, selected: bool) -> ListItem<'static> {
    let mut lines = vec![Line::from(Span::styled(
        place.name.clone().unwrap_or_default(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for contact in place.contact_line().lines() {
        lines.push(Line::from(contact.to_string()));
    }
    lines.push(Line::from(Span::styled(
        place.subtitle(),
        Style::default().fg(Color::DarkGray),
    )));

    let style = if selected {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };
    ListItem::new(Text::from(lines)).style(style)
}
