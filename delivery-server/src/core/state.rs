use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderLifecycle;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是后端的核心数据结构。Clone 仅复制连接池句柄，
/// 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | lifecycle | OrderLifecycle | 订单生命周期核心 |
/// | epoch | String | 本次启动的实例 ID |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 订单生命周期核心 (持久化网关显式注入)
    pub lifecycle: OrderLifecycle,
    /// 服务器实例 epoch - 每次启动生成的唯一 ID
    pub epoch: String,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/delivery.db, 自动迁移)
    /// 3. 订单生命周期核心
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::Internal(format!("Failed to create work directory: {e}")))?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("delivery.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let pool = db_service.pool;

        // 2. Initialize lifecycle core
        let lifecycle = OrderLifecycle::new(pool.clone());

        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "Server state initialized");

        Ok(Self {
            config: config.clone(),
            pool,
            lifecycle,
            epoch,
        })
    }

    /// 直接基于现有连接池构造 (测试用)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let lifecycle = OrderLifecycle::new(pool.clone());
        Self {
            config,
            pool,
            lifecycle,
            epoch: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// 获取连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 获取订单生命周期核心
    pub fn lifecycle(&self) -> &OrderLifecycle {
        &self.lifecycle
    }
}
