//! PostgreSQL store tests.
//!
//! These run only when `FORMHUB_TEST_DATABASE_URL` points at a scratch
//! database; otherwise each test returns early. Names are randomized so
//! repeated runs against the same database do not collide.

use formhub_core::config::DatabaseConfig;
use formhub_core::error::ErrorKind;
use formhub_database::StoreManager;
use formhub_entity::form::CreateForm;

async fn manager() -> Option<StoreManager> {
    let url = std::env::var("FORMHUB_TEST_DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        provider: "postgres".to_string(),
        url,
        ..DatabaseConfig::memory()
    };
    Some(StoreManager::new(&config).await.expect("connect to test database"))
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

#[tokio::test]
async fn test_folder_membership_is_derived() {
    let Some(stores) = manager().await else {
        return;
    };
    let folder = stores.folders.create(&unique("Surveys")).await.unwrap();
    assert!(folder.form_ids.is_empty());

    let a = stores
        .forms
        .create(&CreateForm {
            name: "A".to_string(),
            folder_id: Some(folder.id),
        })
        .await
        .unwrap();
    let b = stores
        .forms
        .create(&CreateForm {
            name: "B".to_string(),
            folder_id: Some(folder.id),
        })
        .await
        .unwrap();

    let loaded = stores.folders.find_by_id(folder.id).await.unwrap().unwrap();
    assert_eq!(loaded.form_ids, vec![a.id, b.id]);

    assert!(stores.forms.delete(a.id).await.unwrap());
    let loaded = stores.folders.find_by_id(folder.id).await.unwrap().unwrap();
    assert_eq!(loaded.form_ids, vec![b.id]);

    let unfiled = stores.folders.delete(folder.id).await.unwrap();
    assert_eq!(unfiled, vec![b.id]);
    let b = stores.forms.find_by_id(b.id).await.unwrap().unwrap();
    assert!(b.is_unfiled());
    stores.forms.delete(b.id).await.unwrap();
}

#[tokio::test]
async fn test_constraints_map_to_domain_errors() {
    let Some(stores) = manager().await else {
        return;
    };
    let name = unique("Dup");
    let folder = stores.folders.create(&name).await.unwrap();
    let err = stores.folders.create(&name).await.unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    let create = CreateForm {
        name: "NPS".to_string(),
        folder_id: Some(folder.id),
    };
    let form = stores.forms.create(&create).await.unwrap();
    let err = stores.forms.create(&create).await.unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    let err = stores
        .forms
        .create(&CreateForm {
            name: "Orphan".to_string(),
            folder_id: Some(formhub_core::types::FolderId::new()),
        })
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    stores.forms.delete(form.id).await.unwrap();
    stores.folders.delete(folder.id).await.unwrap();
}

#[tokio::test]
async fn test_folder_delete_rolls_back_on_unfiled_collision() {
    let Some(stores) = manager().await else {
        return;
    };
    let shared = unique("Shared");
    let folder = stores.folders.create(&unique("Folder")).await.unwrap();
    let filed = stores
        .forms
        .create(&CreateForm {
            name: shared.clone(),
            folder_id: Some(folder.id),
        })
        .await
        .unwrap();
    let loose = stores
        .forms
        .create(&CreateForm {
            name: shared,
            folder_id: None,
        })
        .await
        .unwrap();

    let err = stores.folders.delete(folder.id).await.unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    let still = stores.folders.find_by_id(folder.id).await.unwrap().unwrap();
    assert_eq!(still.form_ids, vec![filed.id]);

    stores.forms.delete(loose.id).await.unwrap();
    stores.forms.delete(filed.id).await.unwrap();
    stores.folders.delete(folder.id).await.unwrap();
}
