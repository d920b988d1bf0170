//! 配置加载 (~/.config/storefront-cart/config.toml)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CartError;

pub const APP_NAME: &str = "storefront-cart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 价格前缀
    pub currency: String,
    /// 是否显示数量加减控件
    pub quantity_stepper: bool,
    pub cart_file: Option<PathBuf>,
    pub catalog_file: Option<PathBuf>,
    pub log_level: String,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    pub project_id: String,
    pub dataset: String,
    pub placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "Rs".to_string(),
            quantity_stepper: true,
            cart_file: None,
            catalog_file: None,
            log_level: "info".to_string(),
            images: ImageConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.sanity.io".to_string(),
            project_id: String::new(),
            dataset: "production".to_string(),
            placeholder: "/placeholder-image.png".to_string(),
        }
    }
}

impl Config {
    /// 从TOML文件加载配置，文件不存在时使用默认值
    pub fn load(path: &Path) -> Result<Self, CartError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| CartError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn cart_path(&self, data_dir: &Path) -> PathBuf {
        self.cart_file
            .clone()
            .unwrap_or_else(|| data_dir.join("cart.toml"))
    }

    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        self.catalog_file
            .clone()
            .unwrap_or_else(|| data_dir.join("catalog.toml"))
    }
}

/// 配置文件路径
pub fn config_path() -> Result<PathBuf, CartError> {
    let dir = dirs::config_dir().ok_or(CartError::NoDataDir("config"))?;
    Ok(dir.join(APP_NAME).join("config.toml"))
}

/// 获取数据目录路径 (~/.local/share/storefront-cart/)
pub fn data_dir() -> Result<PathBuf, CartError> {
    let dir = dirs::data_dir()
        .ok_or(CartError::NoDataDir("data"))?
        .join(APP_NAME);

    fs::create_dir_all(&dir)?;

    Ok(dir)
}
