//! 通用 UI 组件
//!
//! 弹窗框架、数量控件、价格格式化

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear},
};

/// 品牌色
pub const BRAND: Color = Color::Rgb(0x73, 0x8b, 0x6a);

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 按钮
pub fn button(label: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .fg(Color::White)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}

/// 数量控件文本：启用加减时为 `[-] n [+]`，否则只显示存储中的原始数量
pub fn quantity_label(display_quantity: u32, stored_quantity: u32, stepper: bool) -> String {
    if stepper {
        format!("[-] {display_quantity} [+]")
    } else {
        format!("Qty: {stored_quantity}")
    }
}

/// 固定两位小数的金额
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{currency} {amount:.2}")
}
