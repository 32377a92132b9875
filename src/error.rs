//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 单条结构校验失败记录
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// 点分隔的字段路径，例如 `colors.12.1`；空字符串表示根节点
    pub path: String,
    /// 错误描述
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// 全部校验失败记录（按路径排序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(mut items: Vec<Violation>) -> Self {
        items.sort();
        Self(items)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 是否存在以 `prefix` 开头的路径（`colors` 同时匹配 `colors` 与 `colors.3`）
    pub fn mentions(&self, prefix: &str) -> bool {
        self.0.iter().any(|v| {
            v.path == prefix
                || v.path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// 编解码错误类型
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("输入数据不完整: 偏移 {offset} 处无法读取 {wanted}")]
    TruncatedInput { offset: u64, wanted: &'static str },

    #[error("无效的数据:\n{0}")]
    InvalidData(Violations),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("文件不是有效的 UTF-8 文本: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
