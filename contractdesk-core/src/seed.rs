use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::models::{
    AuditLogEntry, Contract, Customer, Expense, GenericRow, InvoiceStatus, PartyStatus,
    PaymentStatus, PaymentTerm, PermissionNode, ProjectMember, StatusColor, Supplier, SystemUser,
    UserGroup, STATUS_COMPLETED,
};
use crate::store::{EntityStore, MasterData};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap_or_default()
}

fn vnd(amount: i64) -> Decimal {
    Decimal::from(amount)
}

/// Startup lists for every shared category.
pub fn seed_master_data() -> MasterData {
    let mut customers = vec![
        Customer {
            contact_person: "Trần Văn Minh".to_string(),
            phone: "0241234567".to_string(),
            tax_code: "0100109106".to_string(),
            address: "57 Huỳnh Thúc Kháng, Hà Nội".to_string(),
            group: "VIP".to_string(),
            ..Customer::new("KH001", "VNPT Hà Nội")
        },
        Customer {
            contact_person: "Lê Thu Hà".to_string(),
            tax_code: "0100233488".to_string(),
            ..Customer::new("KH002", "Tổng công ty Bưu điện")
        },
        Customer::new("KH003", "Sở Tài chính Bắc Ninh"),
    ];
    customers[2].status = PartyStatus::Inactive;

    let mut suppliers = vec![
        Supplier {
            field: "Phần cứng".to_string(),
            ..Supplier::new("NCC001", "Công ty Thiết bị Sao Việt")
        },
        Supplier {
            field: "Dịch vụ".to_string(),
            ..Supplier::new("NCC002", "Công ty Hạ tầng Mây Xanh")
        },
    ];
    suppliers[1].status = PartyStatus::Inactive;

    MasterData {
        customers,
        suppliers,
        units: vec![
            GenericRow::new("BO", "Bộ", "Trọn bộ phần mềm"),
            GenericRow::new("THANG", "Tháng", "Thuê bao theo tháng"),
            GenericRow::new("GOI", "Gói", ""),
        ],
        software_types: vec![
            GenericRow::new("ERP", "ERP", "Quản trị doanh nghiệp"),
            GenericRow::new("HRM", "HRM", "Quản lý nhân sự"),
            GenericRow::new("DMS", "DMS", "Quản lý văn bản"),
        ],
        contract_types: vec![
            GenericRow::new("TRIENKHAI", "Triển khai", ""),
            GenericRow::new("BAOTRI", "Bảo trì", ""),
            GenericRow::new("THUEBAO", "Thuê bao", ""),
        ],
        statuses: vec![
            GenericRow::new("NOT_STARTED", "Chưa thực hiện", "").with_color(StatusColor::Gray),
            GenericRow::new("IN_PROGRESS", "Đang thực hiện", "").with_color(StatusColor::Blue),
            GenericRow::new(STATUS_COMPLETED, "Hoàn thành", "").with_color(StatusColor::Green),
            GenericRow::new("PAUSED", "Tạm dừng", "").with_color(StatusColor::Yellow),
        ],
    }
}

fn seed_contracts(master: &MasterData) -> Vec<Contract> {
    let mut erp = Contract {
        id: Uuid::new_v4(),
        code: "HD-2024-001".to_string(),
        sign_date: Some(date(2024, 3, 15)),
        customer_name: master.customers[0].name.clone(),
        content: "Triển khai hệ thống ERP".to_string(),
        software_types: vec!["ERP".to_string()],
        contract_type: "TRIENKHAI".to_string(),
        value_pre_vat: vnd(1_000_000_000),
        value_post_vat: vnd(1_100_000_000),
        duration: "12 tháng".to_string(),
        status: "IN_PROGRESS".to_string(),
        ..Contract::blank(Decimal::from(10))
    };

    let mut advance = PaymentTerm::new(1);
    advance.content = "Tạm ứng".to_string();
    advance.ratio = Decimal::from(30);
    advance.value = vnd(330_000_000);
    advance.is_collected = true;
    advance.collection_date = Some(date(2024, 4, 1));
    advance.invoice_status = InvoiceStatus::Exported;

    let mut acceptance = PaymentTerm::new(2);
    acceptance.content = "Nghiệm thu".to_string();
    acceptance.ratio = Decimal::from(70);
    acceptance.value = vnd(770_000_000);
    erp.payment_terms = vec![advance, acceptance];

    erp.expenses = vec![Expense {
        category: "Thiết bị".to_string(),
        description: "Máy chủ ứng dụng".to_string(),
        supplier_id: master.suppliers[0].id.to_string(),
        total_amount: vnd(150_000_000),
        payment_status: PaymentStatus::Paid,
        pic: "Phạm Quang Huy".to_string(),
        ..Expense::new()
    }];
    erp.members = vec![
        ProjectMember {
            member_code: "NV001".to_string(),
            name: "Đỗ Thanh Tùng".to_string(),
            role: "PM".to_string(),
            ..ProjectMember::new()
        },
        ProjectMember {
            member_code: "NV014".to_string(),
            name: "Vũ Mai Anh".to_string(),
            ..ProjectMember::new()
        },
    ];

    let maintenance = Contract {
        id: Uuid::new_v4(),
        code: "HD-2023-017".to_string(),
        sign_date: Some(date(2023, 9, 1)),
        customer_name: master.customers[1].name.clone(),
        content: "Bảo trì phần mềm quản lý văn bản".to_string(),
        software_types: vec!["DMS".to_string()],
        contract_type: "BAOTRI".to_string(),
        value_pre_vat: vnd(200_000_000),
        value_post_vat: vnd(220_000_000),
        duration: "6 tháng".to_string(),
        // legacy literal kept by older records
        status: "completed".to_string(),
        acceptance_date: Some(date(2024, 2, 28)),
        ..Contract::blank(Decimal::from(10))
    };

    vec![erp, maintenance]
}

fn seed_permissions() -> Vec<PermissionNode> {
    let mut nodes = vec![
        PermissionNode::parent("contracts", "Quản lý hợp đồng"),
        PermissionNode::child("contracts.list", "Danh sách hợp đồng", "contracts"),
        PermissionNode::child("contracts.payments", "Điều khoản thanh toán", "contracts"),
        PermissionNode::child("contracts.expenses", "Chi phí", "contracts"),
        PermissionNode::parent("categories", "Danh mục dùng chung"),
        PermissionNode::child("categories.customers", "Khách hàng", "categories"),
        PermissionNode::child("categories.suppliers", "Nhà cung cấp", "categories"),
        PermissionNode::parent("system", "Quản trị hệ thống"),
        PermissionNode::child("system.users", "Người dùng", "system"),
        PermissionNode::child("system.logs", "Nhật ký hệ thống", "system"),
    ];
    for node in nodes.iter_mut().filter(|n| n.id.starts_with("contracts")) {
        node.can_view = true;
    }
    nodes
}

fn seed_audit_log() -> Vec<AuditLogEntry> {
    vec![
        AuditLogEntry {
            id: Uuid::new_v4(),
            timestamp: at(2024, 5, 20, 8, 30),
            user: "admin".to_string(),
            screen: "Đăng nhập".to_string(),
            action: "LOGIN".to_string(),
            details: json!({ "ip": "10.0.0.12" }),
        },
        AuditLogEntry {
            id: Uuid::new_v4(),
            timestamp: at(2024, 5, 20, 9, 5),
            user: "lan.nt".to_string(),
            screen: "Quản lý hợp đồng".to_string(),
            action: "UPDATE".to_string(),
            details: json!({ "contract": "HD-2024-001", "field": "status", "to": "IN_PROGRESS" }),
        },
        AuditLogEntry {
            id: Uuid::new_v4(),
            timestamp: at(2024, 5, 21, 14, 12),
            user: "admin".to_string(),
            screen: "Danh mục dùng chung".to_string(),
            action: "DELETE".to_string(),
            details: json!({ "category": "units", "code": "CAI" }),
        },
    ]
}

impl EntityStore {
    /// Store populated with the startup seed lists and demo records.
    pub fn seeded() -> Self {
        let master = seed_master_data();
        let contracts = seed_contracts(&master);

        let groups = vec![
            UserGroup {
                id: Uuid::new_v4(),
                name: "Quản trị".to_string(),
                description: "Toàn quyền hệ thống".to_string(),
            },
            UserGroup {
                id: Uuid::new_v4(),
                name: "Kế toán".to_string(),
                description: "Theo dõi thanh toán".to_string(),
            },
        ];
        let users = vec![
            SystemUser {
                id: Uuid::new_v4(),
                username: "admin".to_string(),
                full_name: "Quản trị viên".to_string(),
                email: "admin@example.com".to_string(),
                group_id: Some(groups[0].id),
                is_active: true,
                last_login_at: Some(at(2024, 5, 20, 8, 30)),
            },
            SystemUser {
                id: Uuid::new_v4(),
                username: "lan.nt".to_string(),
                full_name: "Nguyễn Thị Lan".to_string(),
                email: "lan.nt@example.com".to_string(),
                group_id: Some(groups[1].id),
                is_active: true,
                last_login_at: None,
            },
        ];

        Self {
            selected_contract: contracts.first().map(|c| c.id),
            contracts,
            master,
            users,
            groups,
            permissions: seed_permissions(),
            audit_log: seed_audit_log(),
        }
    }
}
