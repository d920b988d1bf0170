//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::image::ImageUrlBuilder;
use crate::models::{CartItem, Product};
use crate::storage::CartRepository;

/// 页面路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Cart,
    Checkout,
    Shop,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Cart => "/cart",
            Route::Checkout => "/checkout",
            Route::Shop => "/shop",
        }
    }
}

/// 购物车加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    /// 等待用户确认，确认前不修改任何状态
    Confirm(ConfirmAction),
    /// 提示框，关闭后执行 then
    Acknowledge(Acknowledgement),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Remove(String),
}

/// 确认框的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckKind {
    Success,
    Error,
}

/// 提示框
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    pub kind: AckKind,
    pub title: String,
    pub text: String,
    /// 关闭后跳转的路由
    pub then: Option<Route>,
}

impl Acknowledgement {
    pub fn new(kind: AckKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            text: text.into(),
            then: None,
        }
    }

    pub fn then(mut self, route: Route) -> Self {
        self.then = Some(route);
        self
    }
}

/// 视图设置
#[derive(Debug, Clone)]
pub struct Settings {
    pub currency: String,
    pub quantity_stepper: bool,
    pub images: ImageUrlBuilder,
}

/// 应用状态
pub struct App {
    pub(super) repository: Box<dyn CartRepository>,
    pub settings: Settings,
    pub route: Route,
    pub status: LoadStatus,
    pub cart_items: Vec<CartItem>,
    pub total_price: f64,
    pub catalog: Vec<Product>,
    pub selected_index: usize,
    pub shop_index: usize,
    pub mode: AppMode,
    pub message: Option<String>,
}

impl App {
    /// 创建新的应用实例，首次加载由事件循环在第一帧之后触发
    pub fn new(
        repository: Box<dyn CartRepository>,
        settings: Settings,
        catalog: Vec<Product>,
    ) -> Self {
        Self {
            repository,
            settings,
            route: Route::Cart,
            status: LoadStatus::Loading,
            cart_items: Vec::new(),
            total_price: 0.0,
            catalog,
            selected_index: 0,
            shop_index: 0,
            mode: AppMode::Normal,
            message: None,
        }
    }

    #[cfg(test)]
    pub fn repository(&self) -> &dyn CartRepository {
        self.repository.as_ref()
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart_items.is_empty()
    }

    /// 获取当前选中的条目
    pub fn selected_item(&self) -> Option<&CartItem> {
        self.cart_items.get(self.selected_index)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.catalog.get(self.shop_index)
    }

    /// 确保选中索引有效
    pub(super) fn clamp_selection(&mut self) {
        if self.cart_items.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.cart_items.len() {
            self.selected_index = self.cart_items.len() - 1;
        }
    }
}
