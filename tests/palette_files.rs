//! 调色板映射文件加载/保存测试

use shadowdive::formats::palette_mapping::PaletteMapping;
use shadowdive::image::{PALETTE_SIZE, REMAP_COUNT, REMAP_SIZE};
use shadowdive::{CodecError, Color, Entrypoint, JsonOptions};
use tempfile::tempdir;

fn native_bytes() -> Vec<u8> {
    let mut data = Vec::with_capacity(PaletteMapping::NATIVE_SIZE);
    for i in 0..PALETTE_SIZE {
        let v = (i % 64) as u8;
        data.extend_from_slice(&[v, 63 - v, v / 2]);
    }
    for k in 0..REMAP_COUNT {
        data.extend((0..REMAP_SIZE).map(|m| (m ^ k) as u8));
    }
    data
}

#[test]
fn test_native_file_round_trip() -> anyhow::Result<()> {
    shadowdive::logging::init();
    let dir = tempdir()?;
    let src = dir.path().join("palette.bin");
    let dst = dir.path().join("palette_out.bin");
    std::fs::write(&src, native_bytes())?;

    let mut mapping = PaletteMapping::new();
    mapping.load_native(&src)?;
    assert_eq!(mapping.color(63), Some(Color::new(0xFF, 0, 0x7D)));

    mapping.save_native(&dst)?;
    assert_eq!(std::fs::read(&dst)?, native_bytes());
    Ok(())
}

#[test]
fn test_json_file_round_trip() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("palette.json");

    let mut mapping = PaletteMapping::new();
    mapping.from_bytes(&native_bytes())?;
    mapping.save_json(&path, &JsonOptions::pretty(2))?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("{\n  \"colors\""));

    let mut loaded = PaletteMapping::new();
    loaded.load_json(&path)?;
    assert_eq!(loaded, mapping);
    Ok(())
}

#[test]
fn test_json_then_native_keeps_canonical_colors() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let json_path = dir.path().join("palette.json");
    let bin_path = dir.path().join("palette.bin");

    let mut mapping = PaletteMapping::new();
    mapping.from_bytes(&native_bytes())?;
    mapping.save_json(&json_path, &JsonOptions::default())?;

    let mut loaded = PaletteMapping::new();
    loaded.load_json(&json_path)?.save_native(&bin_path)?;
    assert_eq!(std::fs::read(&bin_path)?, native_bytes());
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().expect("创建临时目录失败");
    let mut mapping = PaletteMapping::new();
    let result = mapping.load_native(dir.path().join("missing.bin"));
    assert!(matches!(result, Err(CodecError::Io(_))));
}

#[test]
fn test_short_native_file_is_truncated() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("short.bin");
    std::fs::write(&path, &native_bytes()[..768])?;

    let mut mapping = PaletteMapping::new();
    match mapping.load_native(&path) {
        Err(CodecError::TruncatedInput { offset, .. }) => assert_eq!(offset, 768),
        other => panic!("期望 TruncatedInput, 实际为 {other:?}"),
    }
    Ok(())
}

#[test]
fn test_invalid_json_file_lists_violations() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"colors": [[1, 2, 3]], "remaps": []}"#)?;

    let mut mapping = PaletteMapping::new();
    match mapping.load_json(&path) {
        Err(CodecError::InvalidData(v)) => {
            assert!(v.mentions("colors"));
            assert!(v.mentions("remaps"));
            assert_eq!(v.len(), 2);
        }
        other => panic!("期望 InvalidData, 实际为 {other:?}"),
    }
    Ok(())
}

#[test]
fn test_non_utf8_json_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("binary.json");
    std::fs::write(&path, [0xFFu8, 0xFE, 0x00])?;

    let mut mapping = PaletteMapping::new();
    assert!(matches!(mapping.load_json(&path), Err(CodecError::Utf8(_))));
    Ok(())
}
