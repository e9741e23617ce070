use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::*;
use crate::models::{InvoiceStatus, PaymentStatus, STATUS_COMPLETED, STATUS_NOT_STARTED};
use crate::store::EntityStore;

fn vnd(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn upload_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

/// Store with one contract carrying one payment term.
fn store_with_contract() -> (EntityStore, Uuid) {
    let mut store = EntityStore::default();
    let mut contract = Contract::blank(vnd(10));
    contract.id = Uuid::new_v4();
    contract.code = "HD-2024-010".to_string();
    contract.value_post_vat = vnd(500_000_000);
    let mut term = PaymentTerm::new(1);
    term.content = "Tạm ứng".to_string();
    contract.payment_terms.push(term);
    let id = contract.id;
    store.contracts.push(contract);
    (store, id)
}

#[test]
fn test_open_for_create_defaults() {
    let mut form = ContractForm::new(vnd(10));
    form.open_for_create();

    let draft = form.draft().unwrap();
    assert_eq!(form.mode(), FormMode::Creating);
    assert_eq!(draft.status, STATUS_NOT_STARTED);
    assert_eq!(draft.vat, vnd(10));
    assert_eq!(draft.value_post_vat, Decimal::ZERO);
    assert!(draft.attachments.is_empty());
    assert!(draft.payment_terms.is_empty());
    assert!(draft.expenses.is_empty());
    assert!(draft.members.is_empty());
}

#[test]
fn test_edits_on_closed_form_are_rejected() {
    let mut form = ContractForm::default();
    assert_eq!(
        form.set_field(ContractField::Code("X".to_string())),
        Err(ContractFormError::NotOpen)
    );
    assert_eq!(form.add_payment_term(), Err(ContractFormError::NotOpen));
}

#[test]
fn test_payment_terms_are_numbered_by_count() {
    let mut form = ContractForm::default();
    form.open_for_create();
    let first = form.add_payment_term().unwrap();
    form.add_payment_term().unwrap();
    form.delete_payment_term(first).unwrap();
    form.add_payment_term().unwrap();

    let batches: Vec<&str> = form
        .draft()
        .unwrap()
        .payment_terms
        .iter()
        .map(|t| t.batch.as_str())
        .collect();
    assert_eq!(batches, vec!["Đợt 2", "Đợt 2"]);

    let term = &form.draft().unwrap().payment_terms[0];
    assert_eq!(term.ratio, Decimal::ZERO);
    assert_eq!(term.value, Decimal::ZERO);
    assert!(!term.is_collected);
    assert_eq!(term.invoice_status, InvoiceStatus::NotExported);
}

#[test]
fn test_ratio_uses_current_post_vat_value() {
    // 100M before VAT at 10%; post-VAT is entered by hand
    let mut form = ContractForm::default();
    form.open_for_create();
    form.set_field(ContractField::ValuePreVat(vnd(100_000_000))).unwrap();
    form.set_field(ContractField::Vat(vnd(10))).unwrap();
    form.set_field(ContractField::ValuePostVat(vnd(110_000_000))).unwrap();
    let term = form.add_payment_term().unwrap();

    form.update_payment_term(term, PaymentTermField::Ratio(vnd(50))).unwrap();

    let stored = &form.draft().unwrap().payment_terms[0];
    assert_eq!(stored.ratio, vnd(50));
    assert_eq!(stored.value, vnd(55_000_000));

    form.set_field(ContractField::ValuePostVat(vnd(200_000_000))).unwrap();
    // stale until the ratio is edited again
    assert_eq!(form.draft().unwrap().payment_terms[0].value, vnd(55_000_000));
    form.update_payment_term(term, PaymentTermField::Ratio(vnd(50))).unwrap();
    assert_eq!(form.draft().unwrap().payment_terms[0].value, vnd(100_000_000));
}

#[test]
fn test_post_vat_is_not_derived_from_pre_vat() {
    let mut form = ContractForm::default();
    form.open_for_create();
    form.set_field(ContractField::ValuePreVat(vnd(100_000_000))).unwrap();
    assert_eq!(form.draft().unwrap().value_post_vat, Decimal::ZERO);
}

#[test]
fn test_value_edit_leaves_ratio_unchanged() {
    let mut form = ContractForm::default();
    form.open_for_create();
    form.set_field(ContractField::ValuePostVat(vnd(110_000_000))).unwrap();
    let term = form.add_payment_term().unwrap();
    form.update_payment_term(term, PaymentTermField::Ratio(vnd(30))).unwrap();
    form.update_payment_term(term, PaymentTermField::Value(vnd(1))).unwrap();

    let stored = &form.draft().unwrap().payment_terms[0];
    assert_eq!(stored.ratio, vnd(30));
    assert_eq!(stored.value, vnd(1));
}

#[test]
fn test_update_unknown_term_is_silent_noop() {
    let mut form = ContractForm::default();
    form.open_for_create();
    form.add_payment_term().unwrap();
    let before = form.draft().unwrap().clone();

    assert!(form
        .update_payment_term(Uuid::new_v4(), PaymentTermField::Ratio(vnd(10)))
        .is_ok());
    assert_eq!(form.draft().unwrap(), &before);
}

#[test]
fn test_edit_draft_is_isolated_until_save() {
    let (mut store, id) = store_with_contract();
    let mut form = ContractForm::default();
    form.open_for_edit(store.contract(id).unwrap());

    let term_id = form.draft().unwrap().payment_terms[0].id;
    form.update_payment_term(term_id, PaymentTermField::Content("Đổi nội dung".to_string()))
        .unwrap();
    form.set_field(ContractField::Code("HD-MOI".to_string())).unwrap();

    let stored = store.contract(id).unwrap();
    assert_eq!(stored.payment_terms[0].content, "Tạm ứng");
    assert_eq!(stored.code, "HD-2024-010");

    assert_eq!(form.save(&mut store), Ok(SaveOutcome::Updated(id)));
    let stored = store.contract(id).unwrap();
    assert_eq!(stored.payment_terms[0].content, "Đổi nội dung");
    assert_eq!(stored.code, "HD-MOI");
    assert_eq!(form.mode(), FormMode::Closed);
}

#[test]
fn test_completed_without_acceptance_date_blocks_save() {
    let (mut store, id) = store_with_contract();
    let before = store.contracts.clone();
    let mut form = ContractForm::default();
    form.open_for_edit(store.contract(id).unwrap());
    form.set_field(ContractField::Status(STATUS_COMPLETED.to_string())).unwrap();

    assert_eq!(form.save(&mut store), Err(ContractFormError::AcceptanceDateRequired));
    assert_eq!(store.contracts, before);
    assert_eq!(form.mode(), FormMode::Editing);

    form.set_field(ContractField::AcceptanceDate(Some(upload_day()))).unwrap();
    assert!(form.save(&mut store).is_ok());
    assert_eq!(store.contract(id).unwrap().acceptance_date, Some(upload_day()));
}

#[test]
fn test_legacy_completed_contract_needs_acceptance_date() {
    let mut store = EntityStore::seeded();
    let legacy = store
        .contracts
        .iter()
        .find(|c| c.status == "completed")
        .unwrap()
        .clone();
    assert_eq!(resolve_status(&legacy.status, &store.master.statuses).name, "Hoàn thành");

    let mut form = ContractForm::default();
    form.open_for_edit(&legacy);
    form.set_field(ContractField::AcceptanceDate(None)).unwrap();

    assert_eq!(
        form.validate_for_save(&store.master.statuses),
        Err(ContractFormError::AcceptanceDateRequired)
    );
    assert_eq!(form.save(&mut store), Err(ContractFormError::AcceptanceDateRequired));
    assert_eq!(store.contract(legacy.id).unwrap().acceptance_date, legacy.acceptance_date);

    form.set_field(ContractField::Status("Completed".to_string())).unwrap();
    assert_eq!(form.save(&mut store), Err(ContractFormError::AcceptanceDateRequired));

    form.set_field(ContractField::Status("paused".to_string())).unwrap();
    assert_eq!(form.save(&mut store), Ok(SaveOutcome::Updated(legacy.id)));
}

#[test]
fn test_ratio_edit_on_huge_post_vat_keeps_previous_value() {
    let mut form = ContractForm::default();
    form.open_for_create();
    let term = form.add_payment_term().unwrap();
    form.update_payment_term(term, PaymentTermField::Value(vnd(1_000))).unwrap();
    form.set_field(ContractField::ValuePostVat(Decimal::MAX)).unwrap();

    form.update_payment_term(term, PaymentTermField::Ratio(vnd(50))).unwrap();

    let saved = &form.draft().unwrap().payment_terms[0];
    assert_eq!(saved.ratio, vnd(50));
    assert_eq!(saved.value, vnd(1_000));
}

#[test]
fn test_permissive_values_are_accepted() {
    let mut store = EntityStore::default();
    let mut form = ContractForm::default();
    form.open_for_create();
    form.set_field(ContractField::ValuePreVat(vnd(-5))).unwrap();
    form.set_field(ContractField::Code(String::new())).unwrap();

    assert!(form.validate_for_save(&store.master.statuses).is_ok());
    assert!(form.save(&mut store).is_ok());
}

#[test]
fn test_create_prepends_and_selects() {
    let (mut store, existing) = store_with_contract();
    let mut form = ContractForm::default();
    form.open_for_create();
    form.set_field(ContractField::Code("HD-2024-011".to_string())).unwrap();

    let outcome = form.save(&mut store).unwrap();
    let SaveOutcome::Created(new_id) = outcome else {
        panic!("expected a created outcome, got {:?}", outcome);
    };

    assert_ne!(new_id, Uuid::nil());
    assert_ne!(new_id, existing);
    assert_eq!(store.contracts[0].id, new_id);
    assert_eq!(store.contracts[0].code, "HD-2024-011");
    assert_eq!(store.selected_contract, Some(new_id));
    assert_eq!(form.mode(), FormMode::Closed);
}

#[test]
fn test_save_of_vanished_contract_keeps_form_open() {
    let (mut store, id) = store_with_contract();
    let mut form = ContractForm::default();
    form.open_for_edit(store.contract(id).unwrap());
    store.contracts.clear();

    assert_eq!(form.save(&mut store), Err(ContractFormError::ContractNotFound(id)));
    assert_eq!(form.mode(), FormMode::Editing);
}

#[test]
fn test_cancel_discards_draft() {
    let (mut store, id) = store_with_contract();
    let mut form = ContractForm::default();
    form.open_for_edit(store.contract(id).unwrap());
    form.set_field(ContractField::Code("BỎ".to_string())).unwrap();
    form.cancel();

    assert_eq!(form.mode(), FormMode::Closed);
    assert_eq!(form.save(&mut store), Err(ContractFormError::NotOpen));
    assert_eq!(store.contract(id).unwrap().code, "HD-2024-010");
}

#[test]
fn test_expense_defaults_and_attachments() {
    let mut form = ContractForm::default();
    form.open_for_create();
    let first = form.add_expense().unwrap();
    let second = form.add_expense().unwrap();

    form.add_expense_attachment_on(
        first,
        &[FileInput::new("hoa_don.pdf", 2_097_152), FileInput::new("anh.JPG", 524_288)],
        upload_day(),
    )
    .unwrap();

    let draft = form.draft().unwrap();
    let expense = &draft.expenses[0];
    assert_eq!(expense.payment_status, PaymentStatus::Unpaid);
    assert_eq!(expense.total_amount, Decimal::ZERO);
    assert!(expense.category.is_empty() && expense.supplier_id.is_empty());
    assert_eq!(expense.attachments.len(), 2);
    assert_eq!(expense.attachments[0].size, "2.00 MB");
    assert_eq!(expense.attachments[1].file_type, "jpg");
    assert_eq!(expense.attachments[1].upload_date, upload_day());
    assert!(draft.expenses[1].attachments.is_empty());
    assert!(draft.attachments.is_empty());

    let file_id = expense.attachments[0].id;
    form.remove_expense_attachment(first, file_id).unwrap();
    assert_eq!(form.draft().unwrap().expenses[0].attachments.len(), 1);

    form.update_expense(second, ExpenseField::TotalAmount(vnd(12_000_000))).unwrap();
    form.delete_expense(first).unwrap();
    let draft = form.draft().unwrap();
    assert_eq!(draft.expenses.len(), 1);
    assert_eq!(draft.expenses[0].total_amount, vnd(12_000_000));
}

#[test]
fn test_expense_rows_project_contract_status() {
    let store = EntityStore::seeded();
    let mut form = ContractForm::default();
    form.open_for_edit(&store.contracts[0]);

    let rows = form.expense_rows(&store.master);
    assert_eq!(rows[0].contract_status.name, "Đang thực hiện");
    assert!(rows[0].supplier_name.is_some());

    form.set_field(ContractField::Status(STATUS_COMPLETED.to_string())).unwrap();
    let rows = form.expense_rows(&store.master);
    assert_eq!(rows[0].contract_status.name, "Hoàn thành");
}

#[test]
fn test_contract_attachments_and_members() {
    let mut form = ContractForm::default();
    form.open_for_create();
    form.add_contract_attachment(&[FileInput::new("hop_dong.docx", 1024)]).unwrap();
    let file_id = form.draft().unwrap().attachments[0].id;
    assert_eq!(form.draft().unwrap().attachments[0].file_type, "docx");

    let member = form.add_member().unwrap();
    assert_eq!(form.draft().unwrap().members[0].role, "Dev");
    form.update_member(member, MemberField::Role("PM".to_string())).unwrap();
    form.update_member(member, MemberField::Name("Hoàng Nam".to_string())).unwrap();
    assert_eq!(form.draft().unwrap().members[0].role, "PM");

    form.remove_contract_attachment(file_id).unwrap();
    form.delete_member(member).unwrap();
    let draft = form.draft().unwrap();
    assert!(draft.attachments.is_empty());
    assert!(draft.members.is_empty());
}

#[test]
fn test_total_ratio_sums_terms() {
    let mut form = ContractForm::default();
    form.open_for_create();
    let a = form.add_payment_term().unwrap();
    let b = form.add_payment_term().unwrap();
    form.update_payment_term(a, PaymentTermField::Ratio(vnd(30))).unwrap();
    form.update_payment_term(b, PaymentTermField::Ratio(vnd(60))).unwrap();
    assert_eq!(form.total_ratio(), vnd(90));
}
