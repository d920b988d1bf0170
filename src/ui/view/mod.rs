//! 视图层模块
//!
//! 包含主渲染入口和各页面视图

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{AckKind, Acknowledgement, App, AppMode, ConfirmAction, LoadStatus, Route};
use components::{BRAND, button, format_money, quantity_label, render_dialog_framework};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(8),    // 页面
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app.route, chunks[0]);
    match app.route {
        Route::Cart => render_cart(frame, app, chunks[1]),
        Route::Shop => render_shop(frame, app, chunks[1]),
        Route::Checkout => render_checkout(frame, app, chunks[1]),
    }
    render_help(frame, app, chunks[2]);

    // 渲染弹窗
    match &app.mode {
        AppMode::Confirm(action) => render_confirm_dialog(frame, action),
        AppMode::Acknowledge(ack) => render_ack_dialog(frame, ack),
        AppMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, route: Route, area: Rect) {
    let text = match route {
        Route::Cart => "Shopping Cart",
        Route::Shop => "Shop",
        Route::Checkout => "Checkout",
    };
    let title = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(BRAND).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(route.path()),
        );
    frame.render_widget(title, area);
}

// ============ 购物车页 ============

fn render_cart(frame: &mut Frame, app: &App, area: Rect) {
    match &app.status {
        LoadStatus::Loading => {
            frame.render_widget(Paragraph::new("Loading cart…"), area);
        }
        LoadStatus::Failed(message) => {
            let error = Paragraph::new(format!(
                "Could not load your cart:\n{message}\n\nPress [r] to retry."
            ))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Error").borders(Borders::ALL));
            frame.render_widget(error, area);
        }
        LoadStatus::Ready if app.is_cart_empty() => {
            let empty = Paragraph::new("Your cart is empty.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(BRAND))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
        }
        LoadStatus::Ready => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(4),    // 条目
                    Constraint::Length(3), // 图片
                    Constraint::Length(5), // 总价
                ])
                .split(area);

            render_cart_items(frame, app, chunks[0]);
            render_item_details(frame, app, chunks[1]);
            render_total_panel(frame, app, chunks[2]);
        }
    }
}

fn render_cart_items(frame: &mut Frame, app: &App, area: Rect) {
    let stepper = app.settings.quantity_stepper;
    let items: Vec<ListItem> = app
        .cart_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(BRAND)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", item.name), style),
                Span::styled(
                    format!("  Price: {} {}", app.settings.currency, item.price),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(format!(
                    "   {}",
                    quantity_label(item.display_quantity(), item.quantity, stepper)
                )),
                Span::styled("   [d] Remove", Style::default().fg(Color::Red)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Items").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_item_details(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.selected_item() {
        Some(item) => {
            let image = app.settings.images.resolve(item.image.as_ref());
            let alt = if image == app.settings.images.placeholder() {
                "No Image Available"
            } else {
                item.name.as_str()
            };
            format!("Image: {image} ({alt})")
        }
        None => String::new(),
    };

    let details = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(details, area);
}

fn render_total_panel(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Total: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format_money(&app.settings.currency, app.total_price),
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![button("[Enter] Proceed to Checkout", BRAND)]),
        Line::from(Span::styled(
            "[s] Continue Shopping (/shop)",
            Style::default()
                .fg(BRAND)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND)),
    );
    frame.render_widget(panel, area);
}

// ============ 商店页 ============

fn render_shop(frame: &mut Frame, app: &App, area: Rect) {
    if app.catalog.is_empty() {
        let empty = Paragraph::new("No products available.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .catalog
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let style = if i == app.shop_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(BRAND)
            };
            let stock = product
                .stock_level
                .map(|n| format!("   {n} in stock"))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", product.name), style),
                Span::raw(format!("  {} {}", app.settings.currency, product.price)),
                Span::styled(stock, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Products").borders(Borders::ALL));
    let mut state = ListState::default();
    state.select(Some(app.shop_index));
    frame.render_stateful_widget(list, area, &mut state);
}

// ============ 结算页 ============

fn render_checkout(frame: &mut Frame, app: &App, area: Rect) {
    let currency = &app.settings.currency;
    let mut lines: Vec<Line> = app
        .cart_items
        .iter()
        .map(|item| {
            Line::from(format!(
                "{} x {}   {}",
                item.name,
                item.display_quantity(),
                format_money(currency, item.line_total())
            ))
        })
        .collect();

    if let LoadStatus::Failed(message) = &app.status {
        lines.push(Line::styled(message.clone(), Style::default().fg(Color::Red)));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!("Total: {}", format_money(currency, app.total_price)),
        Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
    ));

    let summary = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Order summary").borders(Borders::ALL));
    frame.render_widget(summary, area);
}

// ============ 帮助栏 ============

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match (&app.mode, app.route) {
        (AppMode::Confirm(_), _) => "[y] Confirm  [n] Cancel",
        (AppMode::Acknowledge(_), _) => "[Enter] OK",
        (AppMode::Normal, Route::Cart) => {
            if app.status == LoadStatus::Ready && !app.is_cart_empty() {
                if app.settings.quantity_stepper {
                    "[j/k] Select  [+/-] Quantity  [d] Remove  [Enter] Checkout  [s] Shop  [q] Quit"
                } else {
                    "[j/k] Select  [d] Remove  [Enter] Checkout  [s] Shop  [q] Quit"
                }
            } else {
                "[s] Continue shopping  [r] Reload  [q] Quit"
            }
        }
        (AppMode::Normal, Route::Shop) => "[j/k] Select  [a] Add to cart  [c] View cart  [q] Quit",
        (AppMode::Normal, Route::Checkout) => "[b] Back to cart  [q] Quit",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{help_text}  |  {message}"),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

// ============ 弹窗 ============

fn render_confirm_dialog(frame: &mut Frame, action: &ConfirmAction) {
    let area = centered_rect(50, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "Are you sure?", Color::Yellow);

    let text = match action {
        ConfirmAction::Remove(_) => "You won't be able to undo this action!",
    };

    let lines = vec![
        Line::from(text),
        Line::from(""),
        Line::from(vec![
            button("Yes, remove it! [y]", Color::Red),
            Span::raw("  "),
            button("Cancel [n]", Color::Blue),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_ack_dialog(frame: &mut Frame, ack: &Acknowledgement) {
    let area = centered_rect(50, 30, frame.area());
    let color = match ack.kind {
        AckKind::Success => Color::Green,
        AckKind::Error => Color::Red,
    };
    let inner = render_dialog_framework(frame, area, &ack.title, color);

    let lines = vec![
        Line::from(ack.text.as_str()),
        Line::from(""),
        Line::from(button("OK [Enter]", color)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
