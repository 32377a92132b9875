//! 资源对象编解码约定
//!
//! 每种资源类型实现 [`DataObject`]（二进制读写、数据树序列化、字段枚举）；
//! 能独立成文件的类型再实现 [`Entrypoint`]，获得原生文件与 JSON 文件的加载/保存。

pub mod palette_mapping;

pub use palette_mapping::PaletteMapping;

use crate::error::{CodecError, Result, Violations};
use crate::parser::{ByteReader, ByteWriter};
use crate::schema::Schema;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

/// 原生文件读写缓冲区大小
pub const IO_BUFFER_SIZE: usize = 8192;

/// 解码值字段名前缀
pub const DECODED_PREFIX: &str = "real_";

/// 序列化中间形式：只含对象、数组与标量
pub type DataTree = Value;

/// 标量字段值
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// 枚举标签
    Label(&'static str),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Int(v) => write!(f, "{v}"),
            PropValue::Float(v) => write!(f, "{v}"),
            PropValue::Text(v) => write!(f, "{v:?}"),
            PropValue::Label(v) => write!(f, "{v}"),
        }
    }
}

/// 字段取值：标量或容器（容器不参与枚举）
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(PropValue),
    Container,
}

/// 静态声明的字段描述
pub struct FieldSlot<T> {
    pub name: &'static str,
    pub get: fn(&T) -> FieldValue,
}

fn container_value<T>(_: &T) -> FieldValue {
    FieldValue::Container
}

impl<T> FieldSlot<T> {
    pub const fn new(name: &'static str, get: fn(&T) -> FieldValue) -> Self {
        Self { name, get }
    }

    /// 容器字段（调色板、重映射表等）
    pub const fn container(name: &'static str) -> Self {
        Self {
            name,
            get: container_value::<T>,
        }
    }
}

/// 字段枚举结果：名称、原始值、可选的解码值
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: &'static str,
    pub value: PropValue,
    pub decoded: Option<PropValue>,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decoded {
            Some(d) => write!(f, "{} = {} ({})", self.name, self.value, d),
            None => write!(f, "{} = {}", self.name, self.value),
        }
    }
}

/// 按顺序合并多层字段描述，只输出标量字段
///
/// 字段 `X` 若存在 `real_X` 描述，则其值作为 `X` 的解码值，`real_X` 本身不单独输出。
pub fn collect_props<T>(obj: &T, chain: &[&[FieldSlot<T>]]) -> Vec<Property> {
    let slots: Vec<&FieldSlot<T>> = chain.iter().flat_map(|layer| layer.iter()).collect();
    let companion = |name: &str| {
        slots
            .iter()
            .find(|s| s.name.strip_prefix(DECODED_PREFIX) == Some(name))
    };

    let mut props = Vec::new();
    for slot in &slots {
        if let Some(base) = slot.name.strip_prefix(DECODED_PREFIX) {
            if slots.iter().any(|s| s.name == base) {
                continue;
            }
        }
        let FieldValue::Scalar(value) = (slot.get)(obj) else {
            continue;
        };
        let decoded = companion(slot.name).and_then(|s| match (s.get)(obj) {
            FieldValue::Scalar(v) => Some(v),
            FieldValue::Container => None,
        });
        props.push(Property {
            name: slot.name,
            value,
            decoded,
        });
    }
    props
}

/// 所有资源对象共同实现的编解码约定
pub trait DataObject: Sized + 'static {
    /// 本类型声明的字段
    const SLOTS: &'static [FieldSlot<Self>] = &[];

    /// 从字节流按固定布局读取，覆盖已有内容
    fn read<R: Read>(&mut self, parser: &mut ByteReader<R>) -> Result<&mut Self>;

    /// 按与 `read` 相同的布局写出
    fn write<W: Write>(&self, parser: &mut ByteWriter<W>) -> Result<()>;

    /// 转为数据树（不做数值变换）
    fn serialize(&self) -> DataTree;

    /// 从已通过结构校验的数据树还原
    fn unserialize(&mut self, data: &DataTree) -> Result<&mut Self>;

    /// 枚举全部标量字段
    fn get_props(&self) -> Vec<Property> {
        collect_props(self, &[Self::SLOTS])
    }
}

/// JSON 输出格式选项（只影响排版，不影响内容）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOptions {
    /// 缩进空格数，`None` 表示紧凑输出
    pub indent: Option<usize>,
}

impl JsonOptions {
    pub const fn compact() -> Self {
        Self { indent: None }
    }

    pub const fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

fn render_json(value: &Value, options: &JsonOptions) -> Result<String> {
    match options.indent {
        None => Ok(serde_json::to_string(value)?),
        Some(width) => {
            let indent = vec![b' '; width];
            let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
            let mut ser = serde_json::Serializer::with_formatter(Vec::new(), formatter);
            value.serialize(&mut ser)?;
            Ok(String::from_utf8(ser.into_inner())?)
        }
    }
}

/// 可独立成文件的资源对象
pub trait Entrypoint: DataObject {
    /// JSON 结构描述
    fn schema() -> Schema;

    /// 加载原生二进制文件
    fn load_native(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        tracing::debug!("加载原生文件: {:?}", path);

        let file = File::open(path)?;
        let mut parser = ByteReader::new(BufReader::with_capacity(IO_BUFFER_SIZE, file));
        self.read(&mut parser)?;

        tracing::debug!("读取 {} 字节", parser.offset());
        Ok(self)
    }

    /// 保存为原生二进制文件
    fn save_native(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!("保存原生文件: {:?}", path);

        let file = File::create(path)?;
        let mut parser = ByteWriter::new(BufWriter::with_capacity(IO_BUFFER_SIZE, file));
        self.write(&mut parser)?;
        parser.flush()?;

        tracing::debug!("写入 {} 字节", parser.written());
        Ok(())
    }

    /// 加载 JSON 文件
    fn load_json(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        tracing::debug!("加载 JSON 文件: {:?}", path);

        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        self.from_json(&text)
    }

    /// 保存为 JSON 文件
    fn save_json(&self, path: impl AsRef<Path>, options: &JsonOptions) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!("保存 JSON 文件: {:?}", path);

        let text = self.to_json(options)?;
        std::fs::write(path, text.as_bytes())?;
        Ok(())
    }

    /// 转为 JSON 文本
    fn to_json(&self, options: &JsonOptions) -> Result<String> {
        render_json(&self.serialize(), options)
    }

    /// 从 JSON 文本还原；结构校验失败时一次性报告全部违规项
    fn from_json(&mut self, text: &str) -> Result<&mut Self> {
        let data: Value = serde_json::from_str(text)?;

        let violations = Self::schema().validate(&data);
        if !violations.is_empty() {
            tracing::error!("JSON 结构校验失败: {} 处错误", violations.len());
            return Err(CodecError::InvalidData(Violations::new(violations)));
        }

        self.unserialize(&data)
    }

    /// 从内存缓冲区读取原生布局
    fn from_bytes(&mut self, data: &[u8]) -> Result<&mut Self> {
        let mut parser = ByteReader::new(Cursor::new(data));
        self.read(&mut parser)
    }

    /// 写出原生布局到内存缓冲区
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut parser = ByteWriter::new(Vec::new());
        self.write(&mut parser)?;
        Ok(parser.into_inner())
    }
}
