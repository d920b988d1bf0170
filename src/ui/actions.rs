//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 购物车
    IncrementQuantity,
    DecrementQuantity,
    StartRemove,
    Checkout,
    ContinueShopping,
    Reload,

    // 商店页
    AddToCart,

    // 路由
    GoToCart,

    // 弹窗
    Confirm, // y
    Cancel,  // Esc / n
    Dismiss, // Enter / Esc / Space
}
