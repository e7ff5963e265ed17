//! 活动目录
//!
//! 静态内存目录，保持插入顺序以便列表接口输出稳定。
//! 每个条目携带显式的 [`BillingMode`]，定价层对其穷举匹配。

use shared::booking::{Activity, ActivityCategory, BillingMode};

/// 活动目录 - 只读，经 ServerState 注入
#[derive(Debug, Clone)]
pub struct ActivityCatalog {
    entries: Vec<Activity>,
}

impl ActivityCatalog {
    /// 营地标准目录
    pub fn standard() -> Self {
        Self::with_entries(vec![
            entry(
                "surf-package-4",
                "Paquete Surf Básico",
                "4 clases de surf con instructor certificado. Incluye tabla y lycra.",
                320.0,
                480,
                2,
                ActivityCategory::Surf,
                BillingMode::PerPerson,
            ),
            entry(
                "surf-package-5",
                "Paquete Surf Intermedio",
                "5 clases de surf + videoanálisis personalizado + material de video y fotográfico. Incluye tabla y lycra.",
                500.0,
                600,
                2,
                ActivityCategory::Surf,
                BillingMode::PerPerson,
            ),
            entry(
                "surf-package-6",
                "Paquete Surf Avanzado",
                "6 clases de surf + videoanálisis personalizado + material de video y fotográfico. Incluye tabla y lycra.",
                600.0,
                720,
                2,
                ActivityCategory::Surf,
                BillingMode::PerPerson,
            ),
            entry(
                "yoga-morning",
                "Yoga Matutino",
                "Sesión de yoga al amanecer para comenzar el día con energía y equilibrio.",
                10.0,
                60,
                15,
                ActivityCategory::Yoga,
                BillingMode::PerSession,
            ),
            entry(
                "ice-bath-session",
                "Baño de Hielo Individual",
                "Sesión individual de terapia de frío para recuperación y bienestar mental.",
                25.0,
                30,
                1,
                ActivityCategory::IceBath,
                BillingMode::PerSession,
            ),
            entry(
                "transport-airport-7am",
                "Transporte Aeropuerto - 7:00 AM",
                "Transporte terrestre desde/hacia el aeropuerto. Salida a las 7:00 AM.",
                50.0,
                360,
                8,
                ActivityCategory::Transport,
                BillingMode::PerSession,
            ),
            entry(
                "transport-airport-3pm",
                "Transporte Aeropuerto - 3:00 PM",
                "Transporte terrestre desde/hacia el aeropuerto. Salida a las 3:00 PM.",
                50.0,
                360,
                8,
                ActivityCategory::Transport,
                BillingMode::PerSession,
            ),
        ])
    }

    /// 自定义条目构造 (测试用)
    pub fn with_entries(entries: Vec<Activity>) -> Self {
        Self { entries }
    }

    /// 按 id 查找条目
    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.entries.iter().find(|a| a.id == id)
    }

    /// 全部条目，按插入顺序
    pub fn all(&self) -> &[Activity] {
        &self.entries
    }

    /// 按分类过滤
    pub fn by_category(&self, category: ActivityCategory) -> Vec<&Activity> {
        self.entries
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    duration: u32,
    max_participants: u32,
    category: ActivityCategory,
    billing: BillingMode,
) -> Activity {
    Activity {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        duration,
        max_participants,
        category,
        billing,
    }
}
