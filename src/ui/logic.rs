//! 业务逻辑处理 (Update/Dispatch)
//!
//! 所有对购物车的修改都遵循同一模式：写入仓库，然后重新读取完整快照并重算总价。
//! 视图本身从不增量维护条目列表。

use tracing::{debug, info, warn};

use super::actions::Action;
use super::state::{
    AckKind, Acknowledgement, App, AppMode, ConfirmAction, DialogOutcome, LoadStatus, Route,
};
use crate::error::CartError;
use crate::models::cart_total;
use crate::storage::CartRepository;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::IncrementQuantity => self.increment_selected(),
            Action::DecrementQuantity => self.decrement_selected(),
            Action::StartRemove => {
                if let Some(item) = self.selected_item() {
                    let id = item.id.clone();
                    self.request_remove(id);
                }
            }
            Action::Checkout => self.checkout(),
            Action::ContinueShopping => self.continue_shopping(),
            Action::Reload => self.load(),

            Action::AddToCart => self.add_selected_product(),
            Action::GoToCart => self.navigate(Route::Cart),

            Action::Confirm => self.resolve_confirm(DialogOutcome::Confirmed),
            Action::Cancel => self.resolve_confirm(DialogOutcome::Cancelled),
            Action::Dismiss => self.dismiss_acknowledgement(),
        }
        false
    }

    // ============ 加载 ============

    /// 从仓库读取完整快照并重算总价
    pub fn load(&mut self) {
        match self.repository.cart_items() {
            Ok(items) => {
                self.total_price = cart_total(&items);
                self.cart_items = items;
                self.status = LoadStatus::Ready;
                debug!(
                    items = self.cart_items.len(),
                    total = self.total_price,
                    "cart loaded"
                );
            }
            Err(e) => {
                warn!(error = %e, "failed to load cart");
                self.cart_items.clear();
                self.total_price = 0.0;
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        self.clamp_selection();
    }

    // ============ 导航相关 ============

    pub fn move_up(&mut self) {
        match self.route {
            Route::Shop => self.shop_index = self.shop_index.saturating_sub(1),
            _ => self.selected_index = self.selected_index.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.route {
            Route::Shop => {
                if self.shop_index + 1 < self.catalog.len() {
                    self.shop_index += 1;
                }
            }
            _ => {
                if self.selected_index + 1 < self.cart_items.len() {
                    self.selected_index += 1;
                }
            }
        }
    }

    /// 切换路由，进入购物车时重新加载
    pub fn navigate(&mut self, route: Route) {
        info!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
        self.message = None;
        if matches!(route, Route::Cart | Route::Checkout) {
            self.load();
        }
    }

    pub fn continue_shopping(&mut self) {
        self.navigate(Route::Shop);
    }

    // ============ 数量 ============

    /// 写入新数量后重新加载，数量至少为 1
    pub fn change_quantity(&mut self, id: &str, quantity: u32) {
        let quantity = quantity.max(1);
        if let Err(e) = self.repository.update_cart_quantity(id, quantity) {
            self.report_error("Could not update quantity", &e);
            return;
        }
        self.load();
    }

    pub fn increment_selected(&mut self) {
        if let Some(item) = self.selected_item() {
            let id = item.id.clone();
            let quantity = item.display_quantity().saturating_add(1);
            self.change_quantity(&id, quantity);
        }
    }

    pub fn decrement_selected(&mut self) {
        if let Some(item) = self.selected_item() {
            let id = item.id.clone();
            let quantity = item.display_quantity().saturating_sub(1).max(1);
            self.change_quantity(&id, quantity);
        }
    }

    // ============ 删除 ============

    /// 打开确认框，此时不做任何修改
    pub fn request_remove(&mut self, id: String) {
        self.mode = AppMode::Confirm(ConfirmAction::Remove(id));
    }

    /// 处理确认框结果
    pub fn resolve_confirm(&mut self, outcome: DialogOutcome) {
        let AppMode::Confirm(action) = &self.mode else {
            return;
        };
        let action = action.clone();
        self.mode = AppMode::Normal;

        match (action, outcome) {
            (ConfirmAction::Remove(id), DialogOutcome::Confirmed) => self.remove(&id),
            (ConfirmAction::Remove(id), DialogOutcome::Cancelled) => {
                debug!(%id, "removal cancelled");
            }
        }
    }

    fn remove(&mut self, id: &str) {
        if let Err(e) = self.repository.remove_from_cart(id) {
            self.report_error("Could not remove item", &e);
            return;
        }
        self.load();
        if self.status == LoadStatus::Ready {
            self.mode = AppMode::Acknowledge(Acknowledgement::new(
                AckKind::Success,
                "Removed!",
                "Item has been removed from your cart.",
            ));
        }
    }

    // ============ 结算 ============

    /// 提示后无条件跳转到结算页
    pub fn checkout(&mut self) {
        info!(items = self.cart_items.len(), total = self.total_price, "checkout requested");
        self.mode = AppMode::Acknowledge(
            Acknowledgement::new(
                AckKind::Success,
                "Proceeding to Checkout",
                "Your order is being processed!",
            )
            .then(Route::Checkout),
        );
    }

    /// 关闭提示框并执行后续跳转
    pub fn dismiss_acknowledgement(&mut self) {
        let AppMode::Acknowledge(ack) = &self.mode else {
            return;
        };
        let then = ack.then;
        self.mode = AppMode::Normal;
        if let Some(route) = then {
            self.navigate(route);
        }
    }

    // ============ 商店页 ============

    pub fn add_selected_product(&mut self) {
        let Some(product) = self.selected_product().cloned() else {
            return;
        };
        match self.repository.add_to_cart(&product) {
            Ok(()) => self.message = Some(format!("{} added to cart", product.name)),
            Err(e) => self.report_error("Could not add to cart", &e),
        }
    }

    // ============ 通用操作 ============

    fn report_error(&mut self, title: &str, error: &CartError) {
        warn!(error = %error, "{title}");
        self.mode = AppMode::Acknowledge(Acknowledgement::new(
            AckKind::Error,
            title,
            error.to_string(),
        ));
    }
}
