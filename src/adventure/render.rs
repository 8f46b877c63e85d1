//! Adventure rendering. Draws the text views from `present.rs`.
//!
//! Layout: title bar + location panel + inventory panel (while open) + log +
//! action hint bar. Every `[X]` option is registered as a click target for its
//! key.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::present::{
    present_inventory, present_location, InventoryView, LocationView, OptionLine,
    EMPTY_INVENTORY, SEPARATOR,
};
use super::state::AdventureState;

pub fn render(
    state: &AdventureState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let view = present_location(state.current_location(), state.mode);
    let inventory = state.inventory_open().then(|| present_inventory(&state.player.inventory));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_title(state, &view, f, chunks[0]);
    if is_narrow_layout(area.width) {
        render_narrow(state, &view, inventory.as_ref(), f, chunks[1], click_state);
    } else {
        render_wide(state, &view, inventory.as_ref(), f, chunks[1], click_state);
    }
    render_hints(&view, f, chunks[2], click_state);
}

/// Wide layout: location (+ inventory) on the left, log on the right.
fn render_wide(
    state: &AdventureState,
    view: &LocationView,
    inventory: Option<&InventoryView>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    match inventory {
        Some(inv) => {
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(6),
                    Constraint::Length(inventory_height(inv)),
                ])
                .split(columns[0]);
            render_location(view, f, left[0], click_state);
            render_inventory(state, inv, f, left[1], click_state);
        }
        None => render_location(view, f, columns[0], click_state),
    }
    render_log(state, f, columns[1]);
}

/// Narrow layout: everything stacked, the log takes what is left.
fn render_narrow(
    state: &AdventureState,
    view: &LocationView,
    inventory: Option<&InventoryView>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let option_rows = (view.items.len() + view.connections.len()) as u16;
    let location_height = option_rows + 8;
    let inventory_rows = inventory.map(inventory_height).unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(location_height),
            Constraint::Length(inventory_rows),
            Constraint::Min(3),
        ])
        .split(area);

    render_location(view, f, chunks[0], click_state);
    if let Some(inv) = inventory {
        render_inventory(state, inv, f, chunks[1], click_state);
    }
    render_log(state, f, chunks[2]);
}

fn inventory_height(inv: &InventoryView) -> u16 {
    (inv.lines.len().max(1) as u16) + 2
}

fn render_title(state: &AdventureState, view: &LocationView, f: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        view.title.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(title) = &state.world.title {
        spans.push(Span::styled(
            format!("  · {}", title),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let widget = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn option_line(option: &OptionLine, key_color: Color, label_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {} ", option.key_label()),
            Style::default().fg(key_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(option.label.clone(), label_style),
    ])
}

fn render_location(
    view: &LocationView,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for text in view.description.lines() {
        cl.push(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::White),
        )));
    }

    if !view.items.is_empty() {
        cl.push(Line::from(""));
        for item in &view.items {
            cl.push_clickable(
                option_line(item, Color::Yellow, Style::default().fg(Color::Yellow)),
                item.key,
            );
        }
    }

    if !view.connections.is_empty() {
        cl.push(Line::from(""));
        for conn in &view.connections {
            cl.push_clickable(
                option_line(conn, Color::Green, Style::default().fg(Color::White)),
                conn.key,
            );
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Location ");
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, area.width.saturating_sub(2));
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_inventory(
    state: &AdventureState,
    inv: &InventoryView,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    if inv.lines.is_empty() {
        cl.push(Line::from(Span::styled(
            format!(" {}", EMPTY_INVENTORY),
            Style::default().fg(Color::DarkGray),
        )));
    }
    for line in &inv.lines {
        let style = if line.selected {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Magenta)
        };
        cl.push_clickable(option_line(&line.option, Color::Magenta, style), line.option.key);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" Inventory ({}) ", state.player.inventory.len()));
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_log(state: &AdventureState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Hint bar. Each hint gets a click target covering its own columns.
fn render_hints(
    view: &LocationView,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    {
        let mut cs = click_state.borrow_mut();
        // Inside the left border, after the leading space.
        let mut x = area.x + 2;
        for hint in &view.hints {
            let width = Line::from(hint.text).width() as u16;
            cs.add_click_target(Rect::new(x, area.y, width, area.height), hint.key);
            x += width + SEPARATOR.len() as u16;
        }
    }

    let line = Line::from(Span::styled(
        format!(" {}", view.hints_line()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}
