//! Delivery Server - multi-tenant food-delivery order backend
//!
//! # 架构概述
//!
//! 本模块是 Delivery Server 的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 创建、状态机流转、取消、配送完成
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//! - **定价** (`pricing`): 门店级价格解析与金额计算
//! - **骑手** (`riders`): 指派状态与实时位置上报
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! delivery-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 请求方身份 (网关已认证)
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── orders/        # 订单生命周期核心
//! ├── pricing/       # 价格解析
//! ├── riders/        # 骑手位置追踪
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod riders;
pub mod utils;

// Re-export 公共类型
pub use auth::{Actor, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{LifecycleError, OrderLifecycle};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: dotenv + 日志
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), None, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____       ___
   / __ \___  / (_)   _____  _______  __
  / / / / _ \/ / / | / / _ \/ ___/ / / /
 / /_/ /  __/ / /| |/ /  __/ /  / /_/ /
/_____/\___/_/_/ |___/\___/_/   \__, /
                               /____/
    "#
    );
}
