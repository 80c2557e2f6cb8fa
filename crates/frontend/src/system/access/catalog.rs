//! Permission string catalog.
//!
//! Mirrors the permission keys issued by the backend. Route metadata and UI
//! visibility checks reference these constants instead of bare strings.

/// Distinguished bypass permission: holders pass every check.
pub const SUPER_USER: &str = "system.super_user";

pub mod dashboard {
    pub const VIEW: &str = "admin.dashboard.view";
}

pub mod cms {
    pub mod products {
        pub const VIEW_ANY: &str = "cms.products.viewAny";
        pub const VIEW: &str = "cms.products.view";
        pub const CREATE: &str = "cms.products.create";
        pub const UPDATE: &str = "cms.products.update";
        pub const DELETE: &str = "cms.products.delete";

        pub const ALL: &[(&str, &str)] = &[
            ("viewAny", VIEW_ANY),
            ("view", VIEW),
            ("create", CREATE),
            ("update", UPDATE),
            ("delete", DELETE),
        ];
    }

    pub mod news {
        pub const VIEW_ANY: &str = "cms.news.viewAny";
        pub const VIEW: &str = "cms.news.view";
        pub const CREATE: &str = "cms.news.create";
        pub const UPDATE: &str = "cms.news.update";
        pub const DELETE: &str = "cms.news.delete";

        pub const ALL: &[(&str, &str)] = &[
            ("viewAny", VIEW_ANY),
            ("view", VIEW),
            ("create", CREATE),
            ("update", UPDATE),
            ("delete", DELETE),
        ];
    }

    pub mod leaders {
        pub const VIEW: &str = "cms.leaders.view";
        pub const CREATE: &str = "cms.leaders.create";
        pub const UPDATE: &str = "cms.leaders.update";
        pub const DELETE: &str = "cms.leaders.delete";

        pub const ALL: &[(&str, &str)] = &[
            ("view", VIEW),
            ("create", CREATE),
            ("update", UPDATE),
            ("delete", DELETE),
        ];
    }
}

pub mod system {
    pub mod notifications {
        pub const VIEW: &str = "system.notification.view";
        pub const MANAGE: &str = "system.notification.manage";

        pub const ALL: &[(&str, &str)] = &[("view", VIEW), ("manage", MANAGE)];
    }
}
