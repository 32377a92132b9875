//! Shadowdive - 格斗游戏资源文件编解码库
//!
//! 每种资源在三种形态之间对称转换：
//! - 固定布局的原生二进制文件
//! - 内存中的类型化对象
//! - 经过结构校验的 JSON 文档
//!
//! 目前支持的资源类型：
//! - 调色板映射 (256 色调色板 + 19 张重映射表)

pub mod error;
pub mod formats;
pub mod image;
pub mod logging;
pub mod parser;
pub mod schema;

pub use error::{CodecError, Result, Violation, Violations};
pub use formats::{DataObject, Entrypoint, JsonOptions, PaletteMapping, Property, PropValue};
pub use image::{Color, expand_6bit, truncate_8bit};
