//! 颜色与调色板基础类型

pub mod palette;

pub use palette::{Color, Palette, Remapping, Remappings, PALETTE_SIZE, REMAP_COUNT, REMAP_SIZE};

/// 6 位 VGA 颜色分量扩展为 8 位
///
/// 左移 2 位后，用原值的最高 2 位填充新的低 2 位，使 0x3F 映射到 0xFF。
#[inline]
pub fn expand_6bit(v: u8) -> u8 {
    (v << 2) | ((v & 0x30) >> 4)
}

/// 8 位颜色分量截断为 6 位（直接丢弃低 2 位）
#[inline]
pub fn truncate_8bit(c: u8) -> u8 {
    c >> 2
}

/// 截断后再扩展能否还原该分量
#[inline]
pub fn is_vga_canonical(c: u8) -> bool {
    expand_6bit(truncate_8bit(c)) == c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_known_values() {
        assert_eq!(expand_6bit(0), 0);
        assert_eq!(expand_6bit(0x3F), 0xFF);
        assert_eq!(expand_6bit(0x30), 0xC3);
        assert_eq!(expand_6bit(0x10), 0x41);
    }

    #[test]
    fn test_truncate_inverts_expand() {
        for v in 0..64u8 {
            assert_eq!(truncate_8bit(expand_6bit(v)), v);
            assert!(is_vga_canonical(expand_6bit(v)));
        }
    }

    #[test]
    fn test_non_canonical_values() {
        // 0x80 的低 2 位应为 0b10
        assert!(!is_vga_canonical(0x80));
        assert_eq!(truncate_8bit(0x80), 0x20);
        assert_eq!(truncate_8bit(0x83), 0x20);
    }
}
