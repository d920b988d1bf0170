use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// 图片资源引用（由内容后端提供的不透明句柄）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ImageRef {
    #[cfg(test)]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            asset: Some(AssetRef {
                reference: Some(reference.into()),
            }),
        }
    }

    /// 资源引用字符串，缺失时返回 None
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|asset| asset.reference.as_deref())
            .filter(|r| !r.is_empty())
    }
}

/// 购物车条目（已校验）
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// 购物车内数量，存储中可能为 0
    pub quantity: u32,
    /// 库存，与购物车数量分离，本程序从不写入
    pub stock_level: Option<u32>,
    pub image: Option<ImageRef>,
}

impl CartItem {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            stock_level: None,
            image: None,
        }
    }

    #[cfg(test)]
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    /// 显示数量，永远不小于 1
    pub fn display_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.display_quantity())
    }
}

/// 购物车总价：Σ price × max(1, quantity)
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

/// 商品目录条目（商店页使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_level: Option<u32>,
}

fn default_quantity() -> u32 {
    1
}

/// TOML 文件中的购物车记录（未校验）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCartItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    // 网页版存储使用 inventory 字段表示购物车数量
    #[serde(alias = "inventory", default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl StoredCartItem {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            stock_level: None,
            image: product.image.clone(),
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// 校验记录，缺少 ID 或价格非法时返回数据完整性错误
    pub fn validate(&self, index: usize) -> Result<CartItem, CartError> {
        let id = match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(CartError::MissingId {
                    index,
                    name: self.name.clone(),
                });
            }
        };

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CartError::InvalidPrice {
                id,
                price: self.price,
            });
        }

        Ok(CartItem {
            id,
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            stock_level: self.stock_level,
            image: self.image.clone(),
        })
    }
}

impl From<&CartItem> for StoredCartItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            stock_level: item.stock_level,
            image: item.image.clone(),
        }
    }
}

/// TOML 文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartData {
    pub meta: CartMeta,
    #[serde(default)]
    pub items: Vec<StoredCartItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMeta {
    pub version: String,
    pub last_modified: DateTime<Local>,
}

impl Default for CartData {
    fn default() -> Self {
        Self {
            meta: CartMeta {
                version: "1.0".to_string(),
                last_modified: Local::now(),
            },
            items: Vec::new(),
        }
    }
}

impl CartData {
    /// 校验所有记录
    pub fn to_items(&self) -> Result<Vec<CartItem>, CartError> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| item.validate(index))
            .collect()
    }

    pub fn touch(&mut self) {
        self.meta.last_modified = Local::now();
    }
}

/// 商品目录文件结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub products: Vec<Product>,
}
