//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode, LoadStatus, Route};

/// 根据当前模式、路由和按键获取对应的 Action
pub fn get_action(app: &App, key: KeyCode) -> Option<Action> {
    match &app.mode {
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Acknowledge(_) => match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
            _ => None,
        },
        AppMode::Normal => match app.route {
            Route::Cart => cart_action(app, key),
            Route::Shop => match key {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
                KeyCode::Char('a') | KeyCode::Enter => Some(Action::AddToCart),
                KeyCode::Char('c') | KeyCode::Esc => Some(Action::GoToCart),
                _ => None,
            },
            Route::Checkout => match key {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('b') | KeyCode::Esc => Some(Action::GoToCart),
                _ => None,
            },
        },
    }
}

fn cart_action(app: &App, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(Action::Reload),
        KeyCode::Char('s') => return Some(Action::ContinueShopping),
        _ => {}
    }

    // 列表、加减按钮和结算按钮只在购物车非空时存在
    if app.status != LoadStatus::Ready || app.is_cart_empty() {
        return None;
    }

    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right
            if app.settings.quantity_stepper =>
        {
            Some(Action::IncrementQuantity)
        }
        KeyCode::Char('-') | KeyCode::Left if app.settings.quantity_stepper => {
            Some(Action::DecrementQuantity)
        }
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::StartRemove),
        KeyCode::Char('c') | KeyCode::Enter => Some(Action::Checkout),
        _ => None,
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    get_action(app, key).is_some_and(|action| app.dispatch(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageConfig;
    use crate::image::ImageUrlBuilder;
    use crate::models::CartItem;
    use crate::storage::InMemoryCartStore;
    use crate::ui::state::{ConfirmAction, Settings};

    fn app_with(items: Vec<CartItem>, stepper: bool) -> App {
        let mut app = unloaded(items, stepper);
        app.load();
        app
    }

    fn unloaded(items: Vec<CartItem>, stepper: bool) -> App {
        App::new(
            Box::new(InMemoryCartStore::new(items)),
            Settings {
                currency: "Rs".to_string(),
                quantity_stepper: stepper,
                images: ImageUrlBuilder::new(&ImageConfig::default()),
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_empty_cart_has_no_checkout() {
        let app = app_with(Vec::new(), true);
        assert_eq!(get_action(&app, KeyCode::Enter), None);
        assert_eq!(get_action(&app, KeyCode::Char('+')), None);
        assert_eq!(
            get_action(&app, KeyCode::Char('s')),
            Some(Action::ContinueShopping)
        );
        assert_eq!(get_action(&app, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_stepper_keys() {
        let app = app_with(vec![CartItem::new("a", "Mug", 1.0, 1)], true);
        assert_eq!(
            get_action(&app, KeyCode::Char('+')),
            Some(Action::IncrementQuantity)
        );
        assert_eq!(
            get_action(&app, KeyCode::Char('-')),
            Some(Action::DecrementQuantity)
        );
        assert_eq!(get_action(&app, KeyCode::Enter), Some(Action::Checkout));

        let without = app_with(vec![CartItem::new("a", "Mug", 1.0, 1)], false);
        assert_eq!(get_action(&without, KeyCode::Char('+')), None);
        assert_eq!(get_action(&without, KeyCode::Char('-')), None);
    }

    #[test]
    fn test_confirm_mode_keys() {
        let mut app = app_with(vec![CartItem::new("a", "Mug", 1.0, 1)], true);
        app.mode = AppMode::Confirm(ConfirmAction::Remove("a".to_string()));
        assert_eq!(get_action(&app, KeyCode::Char('y')), Some(Action::Confirm));
        assert_eq!(get_action(&app, KeyCode::Esc), Some(Action::Cancel));
        assert_eq!(get_action(&app, KeyCode::Char('+')), None);
        assert_eq!(get_action(&app, KeyCode::Char('q')), None);
    }

    #[test]
    fn test_handle_key_event_quit() {
        let mut app = app_with(Vec::new(), true);
        assert!(!handle_key_event(&mut app, KeyCode::Char('s')));
        assert_eq!(app.route, Route::Shop);
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_loading_cart_has_no_item_actions() {
        let app = unloaded(vec![CartItem::new("a", "Mug", 1.0, 1)], true);
        assert_eq!(get_action(&app, KeyCode::Enter), None);
        assert_eq!(get_action(&app, KeyCode::Char('d')), None);
        assert_eq!(get_action(&app, KeyCode::Char('r')), Some(Action::Reload));
    }
}
