//! 调色板映射 (256 色调色板 + 19 张重映射表)
//!
//! 原生布局固定 5632 字节，无长度前缀、无填充：
//! - 偏移 0: 256 × (r, g, b)，每个分量为 6 位 VGA 值
//! - 偏移 768: 19 × 256 个调色板索引

use crate::error::{CodecError, Result, Violation, Violations};
use crate::formats::{DataObject, DataTree, Entrypoint, FieldSlot};
use crate::image::{Color, Palette, Remapping, Remappings, PALETTE_SIZE, REMAP_COUNT, REMAP_SIZE};
use crate::parser::{ByteReader, ByteWriter};
use crate::schema::Schema;
use serde::Deserialize;
use serde_json::json;
use std::io::{Read, Write};

/// 调色板映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteMapping {
    /// 调色板（8 位 RGB）
    pub colors: Palette,
    /// 重映射表
    pub remaps: Remappings,
}

/// 数据树的原始形态
#[derive(Deserialize)]
struct RawPaletteMapping {
    colors: Vec<[u8; 3]>,
    remaps: Vec<Vec<u8>>,
}

impl PaletteMapping {
    /// 原生布局字节数
    pub const NATIVE_SIZE: usize = PALETTE_SIZE * 3 + REMAP_COUNT * REMAP_SIZE;

    /// 创建空实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否已填充
    pub fn is_populated(&self) -> bool {
        !self.colors.is_empty() || !self.remaps.is_empty()
    }

    /// 获取指定索引的颜色
    pub fn color(&self, index: u8) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    /// 用第 `table` 张重映射表转换调色板索引
    pub fn remap(&self, table: usize, index: u8) -> Option<u8> {
        self.remaps
            .get(table)
            .and_then(|remap| remap.get(index as usize))
            .copied()
    }

    /// 获取调色板
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// 获取全部重映射表
    pub fn remaps(&self) -> &[Remapping] {
        &self.remaps
    }

    /// 写出时会丢失低 2 位的颜色分量总数
    pub fn lossy_channels(&self) -> usize {
        self.colors.iter().map(|c| c.lossy_channels()).sum()
    }
}

impl DataObject for PaletteMapping {
    const SLOTS: &'static [FieldSlot<Self>] = &[
        FieldSlot::container("colors"),
        FieldSlot::container("remaps"),
    ];

    fn read<R: Read>(&mut self, parser: &mut ByteReader<R>) -> Result<&mut Self> {
        let start = parser.offset();

        let mut colors = Palette::with_capacity(PALETTE_SIZE);
        for _ in 0..PALETTE_SIZE {
            let r = parser.get_u8()?;
            let g = parser.get_u8()?;
            let b = parser.get_u8()?;
            colors.push(Color::from_vga(r, g, b));
        }

        let mut remaps = Remappings::with_capacity(REMAP_COUNT);
        for _ in 0..REMAP_COUNT {
            let mut remap = Remapping::with_capacity(REMAP_SIZE);
            for _ in 0..REMAP_SIZE {
                remap.push(parser.get_u8()?);
            }
            remaps.push(remap);
        }

        // 全部读取成功后才替换旧内容
        self.colors = colors;
        self.remaps = remaps;

        tracing::debug!("调色板映射读取完成: {} 字节", parser.offset() - start);
        Ok(self)
    }

    fn write<W: Write>(&self, parser: &mut ByteWriter<W>) -> Result<()> {
        let lossy = self.lossy_channels();
        if lossy > 0 {
            tracing::warn!("{} 个颜色分量不是 VGA 扩展值，写出时低 2 位将被丢弃", lossy);
        }

        for color in &self.colors {
            for channel in color.to_vga() {
                parser.put_u8(channel)?;
            }
        }

        for remap in &self.remaps {
            for &index in remap {
                parser.put_u8(index)?;
            }
        }

        Ok(())
    }

    fn serialize(&self) -> DataTree {
        let colors: Vec<[u8; 3]> = self.colors.iter().map(|c| c.to_array()).collect();
        json!({
            "colors": colors,
            "remaps": self.remaps,
        })
    }

    fn unserialize(&mut self, data: &DataTree) -> Result<&mut Self> {
        let raw = RawPaletteMapping::deserialize(data).map_err(|e| {
            CodecError::InvalidData(Violations::new(vec![Violation::new("", e.to_string())]))
        })?;

        self.colors = raw.colors.into_iter().map(Color::from).collect();
        self.remaps = raw.remaps;
        Ok(self)
    }
}

impl Entrypoint for PaletteMapping {
    fn schema() -> Schema {
        let rgb = Schema::tuple(vec![Schema::UInt8, Schema::UInt8, Schema::UInt8]);
        Schema::dict(vec![
            ("colors", Schema::list_exact(rgb, PALETTE_SIZE)),
            (
                "remaps",
                Schema::list_exact(Schema::list_exact(Schema::UInt8, REMAP_SIZE), REMAP_COUNT),
            ),
        ])
    }
}
