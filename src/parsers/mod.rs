//! # 解析器模块
//!
//! 读取 GOAD 输出、PHIPS 测量数据、分箱配置和粒子几何。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型和 `storage/` 读取
//! - 子模块: mueller, reference, bins, obj

pub mod bins;
pub mod mueller;
pub mod obj;
pub mod reference;

pub use bins::parse_bins;
pub use mueller::parse_scatgrid;
pub use obj::parse_obj;
pub use reference::parse_reference;
