//! 购物车存储
//!
//! `CartRepository` 是视图唯一依赖的存储接口：读取快照、按 ID 删除、按 ID 更新数量。
//! 生产环境使用 TOML 文件（`TomlCartStore`），测试使用内存实现（`InMemoryCartStore`）。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CartError;
use crate::models::{CartData, CartItem, CatalogData, Product, StoredCartItem};

/// 购物车仓库接口
pub trait CartRepository {
    /// 当前购物车快照
    fn cart_items(&self) -> Result<Vec<CartItem>, CartError>;

    fn remove_from_cart(&mut self, id: &str) -> Result<(), CartError>;

    /// 调用方负责保证 quantity >= 1
    fn update_cart_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CartError>;

    /// 已存在则数量 +1，否则追加数量为 1 的新条目
    fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError>;
}

// ============ 记录级操作（两种实现共用） ============

fn remove_record(items: &mut Vec<StoredCartItem>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| !item.has_id(id));
    items.len() != before
}

fn update_record(items: &mut [StoredCartItem], id: &str, quantity: u32) -> bool {
    match items.iter_mut().find(|item| item.has_id(id)) {
        Some(item) => {
            item.quantity = quantity;
            true
        }
        None => false,
    }
}

fn add_record(items: &mut Vec<StoredCartItem>, product: &Product) {
    match items.iter_mut().find(|item| item.has_id(&product.id)) {
        Some(item) => item.quantity = item.quantity.max(1) + 1,
        None => items.push(StoredCartItem::from_product(product)),
    }
}

// ============ TOML 文件实现 ============

/// 以 TOML 文件为真实来源的购物车，每次读取都重新解析文件
#[derive(Debug, Clone)]
pub struct TomlCartStore {
    path: PathBuf,
}

impl TomlCartStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<CartData, CartError> {
        if !self.path.exists() {
            return Ok(CartData::default());
        }

        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|source| CartError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, data: &mut CartData) -> Result<(), CartError> {
        data.touch();
        let content = toml::to_string_pretty(data)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), items = data.items.len(), "cart file written");
        Ok(())
    }
}

impl CartRepository for TomlCartStore {
    fn cart_items(&self) -> Result<Vec<CartItem>, CartError> {
        self.read()?.to_items()
    }

    fn remove_from_cart(&mut self, id: &str) -> Result<(), CartError> {
        let mut data = self.read()?;
        if !remove_record(&mut data.items, id) {
            debug!(%id, "remove: no such cart item");
            return Ok(());
        }
        self.write(&mut data)?;
        info!(%id, "removed from cart");
        Ok(())
    }

    fn update_cart_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CartError> {
        let mut data = self.read()?;
        if !update_record(&mut data.items, id, quantity) {
            debug!(%id, quantity, "update: no such cart item");
            return Ok(());
        }
        self.write(&mut data)?;
        info!(%id, quantity, "cart quantity updated");
        Ok(())
    }

    fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError> {
        let mut data = self.read()?;
        add_record(&mut data.items, product);
        self.write(&mut data)?;
        info!(id = %product.id, "added to cart");
        Ok(())
    }
}

// ============ 内存实现 ============

/// 内存中的购物车，用于测试
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
    items: Vec<StoredCartItem>,
}

#[cfg(test)]
impl InMemoryCartStore {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            items: items.iter().map(StoredCartItem::from).collect(),
        }
    }

    /// 直接使用未校验的记录（可以模拟损坏的数据）
    pub fn from_records(items: Vec<StoredCartItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
impl CartRepository for InMemoryCartStore {
    fn cart_items(&self) -> Result<Vec<CartItem>, CartError> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| item.validate(index))
            .collect()
    }

    fn remove_from_cart(&mut self, id: &str) -> Result<(), CartError> {
        remove_record(&mut self.items, id);
        Ok(())
    }

    fn update_cart_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CartError> {
        update_record(&mut self.items, id, quantity);
        Ok(())
    }

    fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError> {
        add_record(&mut self.items, product);
        Ok(())
    }
}

/// 从TOML文件加载商品目录
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CartError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let data: CatalogData = toml::from_str(&content).map_err(|source| CartError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(data.products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageRef;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price,
            image: None,
            stock_level: Some(10),
        }
    }

    #[test]
    fn test_missing_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlCartStore::open(dir.path().join("cart.toml"));
        assert!(store.cart_items().unwrap().is_empty());
    }

    #[test]
    fn test_toml_store_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.toml");
        let mut store = TomlCartStore::open(&path);

        store.add_to_cart(&product("a", 100.0)).unwrap();
        store.add_to_cart(&product("b", 50.0)).unwrap();
        store.add_to_cart(&product("a", 100.0)).unwrap();
        assert!(path.exists());

        let items = store.cart_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].stock_level, None);

        store.update_cart_quantity("b", 3).unwrap();
        store.remove_from_cart("a").unwrap();

        // 重新打开，确认已写入磁盘
        let reopened = TomlCartStore::open(&path);
        let items = reopened.cart_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "b");
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        let mut store = TomlCartStore::open(&path);

        store.remove_from_cart("missing").unwrap();
        store.update_cart_quantity("missing", 4).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_image_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlCartStore::open(dir.path().join("cart.toml"));
        let mut with_image = product("a", 1.0);
        with_image.image = Some(ImageRef::new("image-abc-1x1-jpg"));

        store.add_to_cart(&with_image).unwrap();

        let items = store.cart_items().unwrap();
        assert_eq!(items[0].image, Some(ImageRef::new("image-abc-1x1-jpg")));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = TomlCartStore::open(&path);
        assert!(matches!(store.cart_items(), Err(CartError::Parse { .. })));
    }

    #[test]
    fn test_record_without_id_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        fs::write(
            &path,
            r#"
[meta]
version = "1.0"
last_modified = "2026-01-01T10:00:00+00:00"

[[items]]
name = "Nameless"
price = 5.0
"#,
        )
        .unwrap();

        let store = TomlCartStore::open(&path);
        assert!(matches!(
            store.cart_items(),
            Err(CartError::MissingId { index: 0, .. })
        ));
    }

    #[test]
    fn test_in_memory_add_bumps_zero_quantity() {
        let mut store = InMemoryCartStore::new(vec![CartItem::new("a", "Mug", 1.0, 0)]);
        store.add_to_cart(&product("a", 1.0)).unwrap();
        assert_eq!(store.cart_items().unwrap()[0].quantity, 2);
    }

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        assert!(load_catalog(&path).unwrap().is_empty());

        fs::write(
            &path,
            r#"
[[products]]
_id = "p1"
name = "Teapot"
price = 899.5
stock_level = 4
"#,
        )
        .unwrap();

        let products = load_catalog(&path).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Teapot");
        assert_eq!(products[0].stock_level, Some(4));
    }
}
