use crate::api::{Movement, Product};
use crate::ui::app::{App, Panel};
use crate::ui::auth::{AuthField, AuthState, AuthStatus};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::inventory::{InventoryState, Notice};
use crate::ui::layout::{layout_regions, panel_regions};
use crate::ui::movements::{MovementField, MovementsState};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, FOCUSED_BORDER, GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR,
    STATUS_OK, STATUS_PENDING,
};
use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use ratatui::Frame;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn draw(frame: &mut Frame<'_>, app: &App, base_url: &str) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let header_widget = Header::new(base_url, app.is_authenticated(), app.generation());
    frame.render_widget(header_widget.widget(), header);

    frame.render_widget(Clear, body);
    let (auth_area, inventory_area, movements_area) = panel_regions(body);
    draw_auth(frame, app.auth(), auth_area, app.focus() == Panel::Auth);
    draw_inventory(
        frame,
        app.inventory(),
        inventory_area,
        app.focus() == Panel::Inventory,
    );
    draw_movements(
        frame,
        app.movements(),
        movements_area,
        app.focus() == Panel::Movements,
    );

    let footer_widget = Footer::new(app.focus(), app.inventory().is_editing());
    frame.render_widget(footer_widget.widget(footer), footer);
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { FOCUSED_BORDER } else { GLOBAL_BORDER };
    Block::default()
        .title(Span::styled(format!(" {} ", title), Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(HEADER_TEXT).bg(ACTIVE_HIGHLIGHT)
    } else {
        Style::default().fg(HEADER_TEXT)
    };
    let marker = if focused { "▸ " } else { "  " };
    Line::from(vec![
        Span::raw(marker),
        Span::raw(format!("{:<10}", label)),
        Span::styled(value, value_style),
    ])
}

fn draw_auth(frame: &mut Frame<'_>, state: &AuthState, area: Rect, focused: bool) {
    let mut lines = vec![
        field_line(
            "Email",
            state.identifier.clone(),
            focused && state.focused == AuthField::Identifier,
        ),
        field_line(
            "Password",
            state.masked_secret(),
            focused && state.focused == AuthField::Secret,
        ),
        Line::from(""),
    ];
    if let Some(status) = &state.status {
        let color = match status {
            AuthStatus::Pending(_) => STATUS_PENDING,
            AuthStatus::Success(_) => STATUS_OK,
            AuthStatus::Error(_) => STATUS_ERROR,
        };
        lines.push(Line::from(Span::styled(
            status.text().to_string(),
            Style::default().fg(color),
        )));
    }

    let widget = Paragraph::new(lines).block(panel_block("Login", focused));
    frame.render_widget(widget, area);
}

fn draw_inventory(frame: &mut Frame<'_>, state: &InventoryState, area: Rect, focused: bool) {
    let block = panel_block("Inventory", focused);

    // Loading and load errors replace the table.
    if state.loading {
        frame.render_widget(Paragraph::new("Loading...").block(block), area);
        return;
    }
    if let Some(error) = &state.error {
        let line = Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(STATUS_ERROR),
        ));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let mut status_lines = Vec::new();
    if let Some(form) = &state.form {
        status_lines.push(Line::from(vec![
            Span::styled(form.prompt(), Style::default().fg(HEADER_TEXT)),
            Span::raw(": "),
            Span::styled(
                format!("{}▏", form.input),
                Style::default().fg(HEADER_TEXT).bg(ACTIVE_HIGHLIGHT),
            ),
        ]));
        if let Some(error) = &form.error {
            status_lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(STATUS_ERROR),
            )));
        }
    }
    if let Some(notice) = &state.notice {
        let (text, color) = match notice {
            Notice::Pending(text) => (text, STATUS_PENDING),
            Notice::Success(text) => (text, STATUS_OK),
            Notice::Error(text) => (text, STATUS_ERROR),
        };
        status_lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(color),
        )));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(status_lines.len() as u16),
        ])
        .split(inner);

    let header = Row::new(["ID", "SKU", "EAN13", "Name", "Stock"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = state.products.iter().map(product_row);
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(10),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT));

    let mut table_state = TableState::default();
    if !state.products.is_empty() {
        table_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(table, chunks[0], &mut table_state);
    frame.render_widget(Paragraph::new(status_lines), chunks[1]);
}

fn draw_movements(frame: &mut Frame<'_>, state: &MovementsState, area: Rect, focused: bool) {
    let block = panel_block("Movements", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let filter_style = |field: MovementField| {
        if focused && state.focused == field {
            Style::default().fg(HEADER_TEXT).bg(ACTIVE_HIGHLIGHT)
        } else {
            Style::default().fg(HEADER_TEXT)
        }
    };
    let product = if state.product_filter.is_empty() {
        "all".to_string()
    } else {
        state.product_filter.clone()
    };
    let limit = if state.limit == 0 {
        "none".to_string()
    } else {
        state.limit.to_string()
    };
    let filters = Line::from(vec![
        Span::raw("Product ID: "),
        Span::styled(product, filter_style(MovementField::ProductId)),
        Span::raw("   Limit: "),
        Span::styled(limit, filter_style(MovementField::Limit)),
    ]);
    frame.render_widget(Paragraph::new(filters), chunks[0]);

    if state.loading {
        frame.render_widget(Paragraph::new("Loading..."), chunks[1]);
        return;
    }
    if let Some(error) = &state.error {
        let line = Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(STATUS_ERROR),
        ));
        frame.render_widget(Paragraph::new(line), chunks[1]);
        return;
    }

    let header = Row::new([
        "ID", "Product", "Delta", "Before", "After", "Type", "Reason", "Date",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = state.movements.iter().map(movement_row);
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(19),
        ],
    )
    .header(header);
    frame.render_widget(table, chunks[1]);
}

fn product_row(product: &Product) -> Row<'static> {
    let row = Row::new(vec![
        Cell::from(product.id.to_string()),
        Cell::from(product.sku.clone()),
        Cell::from(product.ean13.clone().unwrap_or_default()),
        Cell::from(product.name.clone()),
        Cell::from(product.stock_qty.to_string()),
    ]);
    if product.has_negative_stock() {
        row.style(Style::default().fg(STATUS_ERROR))
    } else {
        row
    }
}

fn movement_row(movement: &Movement) -> Row<'static> {
    let row = Row::new(vec![
        Cell::from(movement.id.to_string()),
        Cell::from(movement.product_id.to_string()),
        Cell::from(format!("{:+}", movement.delta)),
        Cell::from(movement.qty_before.to_string()),
        Cell::from(movement.qty_after.to_string()),
        Cell::from(movement.kind.clone()),
        Cell::from(movement.reason.clone().unwrap_or_else(|| "-".to_string())),
        Cell::from(format_local(&movement.created_at)),
    ]);
    if movement.is_consistent() {
        row
    } else {
        row.style(Style::default().fg(STATUS_ERROR))
    }
}

/// Server timestamps shown in the user's local zone.
pub fn format_local(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
