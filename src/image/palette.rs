//! 调色板与重映射表类型

use super::{expand_6bit, is_vga_canonical, truncate_8bit};

/// 调色板颜色数
pub const PALETTE_SIZE: usize = 256;
/// 重映射表数量
pub const REMAP_COUNT: usize = 19;
/// 每张重映射表的条目数
pub const REMAP_SIZE: usize = 256;

/// RGB 颜色结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 从 6 位 VGA 分量创建颜色
    pub fn from_vga(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: expand_6bit(r),
            g: expand_6bit(g),
            b: expand_6bit(b),
        }
    }

    /// 转换为 6 位 VGA 分量（有损）
    pub fn to_vga(self) -> [u8; 3] {
        [truncate_8bit(self.r), truncate_8bit(self.g), truncate_8bit(self.b)]
    }

    /// 低 2 位无法被 VGA 往返还原的分量个数
    pub fn lossy_channels(self) -> usize {
        [self.r, self.g, self.b]
            .into_iter()
            .filter(|&c| !is_vga_canonical(c))
            .count()
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// 格式化为十六进制颜色字符串 (如 "#FF0000")
    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color(#{:02X}{:02X}{:02X})", self.r, self.g, self.b)
    }
}

/// 调色板类型（按索引排列）
pub type Palette = Vec<Color>;

/// 单张重映射表：调色板索引到调色板索引
pub type Remapping = Vec<u8>;

/// 全部重映射表
pub type Remappings = Vec<Remapping>;
