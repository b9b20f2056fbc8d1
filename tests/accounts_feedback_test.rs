mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use uuid::Uuid;

use forkflow_api::entities::{AccountStatus, StaffRole};
use forkflow_api::errors::ServiceError;
use forkflow_api::services::feedback::SubmitFeedbackInput;
use forkflow_api::services::restaurants::AddStaffInput;

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = common::setup().await;
    common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;

    let err = app
        .services
        .users
        .register(forkflow_api::services::users::RegisterUserInput {
            first_name: "Other".to_string(),
            last_name: "Person".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            address: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn name_collisions_get_suffixed_slugs() {
    let app = common::setup().await;
    let first = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let second = common::seed_user(&app, "Ada", "Lovelace", "ada2@example.com").await;
    let third = common::seed_user(&app, "Ada", "Lovelace", "ada3@example.com").await;

    assert_eq!(first.slug, "ada-lovelace");
    assert_eq!(second.slug, "ada-lovelace-2");
    assert_eq!(third.slug, "ada-lovelace-3");

    let found = app
        .services
        .users
        .get_user_by_slug("ada-lovelace-2")
        .await
        .unwrap();
    assert_eq!(found.id, second.id);
}

#[tokio::test]
async fn removal_is_terminal() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;

    let user = app.services.users.deactivate(user.id).await.unwrap();
    assert_eq!(user.status, AccountStatus::Inactive);

    let user = app.services.users.activate(user.id).await.unwrap();
    assert_eq!(user.status, AccountStatus::Active);

    let user = app.services.users.remove(user.id).await.unwrap();
    assert_eq!(user.status, AccountStatus::Removed);

    let err = app.services.users.activate(user.id).await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn duplicate_tax_number_is_a_conflict() {
    let app = common::setup().await;
    common::seed_restaurant(&app, "Testaurant", "TAX-1").await;

    let mut input = forkflow_api::services::restaurants::CreateRestaurantInput {
        name: "Copycat".to_string(),
        ceo_name: "Pat Owner".to_string(),
        tax_number: "TAX-1".to_string(),
        registration_no: "REG-OTHER".to_string(),
        contact_number: None,
        whatsapp_no: None,
        website_url: None,
        facebook_url: None,
        instagram_url: None,
        summary: None,
        description: None,
        number_of_employees: None,
        opening_time: None,
        closing_time: None,
        delivery: true,
        takeaway: false,
    };

    let err = app
        .services
        .restaurants
        .create_restaurant(input.clone())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    // Same registration number trips the check too.
    input.tax_number = "TAX-9".to_string();
    input.registration_no = "REG-TAX-1".to_string();
    let err = app
        .services
        .restaurants
        .create_restaurant(input)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn second_default_membership_clears_the_first() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let first = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let second = common::seed_restaurant(&app, "Other Place", "TAX-2").await;

    app.services
        .restaurants
        .add_staff(
            first.id,
            AddStaffInput {
                user_id: user.id,
                role: StaffRole::Manager,
                is_default: true,
            },
        )
        .await
        .unwrap();

    app.services
        .restaurants
        .add_staff(
            second.id,
            AddStaffInput {
                user_id: user.id,
                role: StaffRole::Chef,
                is_default: true,
            },
        )
        .await
        .unwrap();

    let first_staff = app.services.restaurants.list_staff(first.id).await.unwrap();
    let second_staff = app
        .services
        .restaurants
        .list_staff(second.id)
        .await
        .unwrap();
    assert!(!first_staff[0].is_default);
    assert!(second_staff[0].is_default);
}

#[tokio::test]
async fn duplicate_membership_is_a_conflict() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;

    let input = AddStaffInput {
        user_id: user.id,
        role: StaffRole::Waiter,
        is_default: false,
    };
    app.services
        .restaurants
        .add_staff(restaurant.id, input.clone())
        .await
        .unwrap();

    let err = app
        .services
        .restaurants
        .add_staff(restaurant.id, input)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn feedback_references_must_exist() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;

    let err = app
        .services
        .feedback
        .submit_feedback(SubmitFeedbackInput {
            customer_id: user.id,
            title: "Great ramen".to_string(),
            rating: Some(5),
            comment: None,
            menu_item_id: None,
            order_id: Some(Uuid::new_v4()),
            restaurant_id: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn feedback_rating_is_bounded() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;

    let err = app
        .services
        .feedback
        .submit_feedback(SubmitFeedbackInput {
            customer_id: user.id,
            title: "Meh".to_string(),
            rating: Some(6),
            comment: None,
            menu_item_id: None,
            order_id: None,
            restaurant_id: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn punctuation_only_title_still_gets_a_slug() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;

    let feedback = app
        .services
        .feedback
        .submit_feedback(SubmitFeedbackInput {
            customer_id: user.id,
            title: "!!!".to_string(),
            rating: Some(1),
            comment: None,
            menu_item_id: None,
            order_id: None,
            restaurant_id: None,
        })
        .await
        .unwrap();
    assert_eq!(feedback.slug, "untitled");
}

#[tokio::test]
async fn feedback_is_stored_and_listed_per_restaurant() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;

    let feedback = app
        .services
        .feedback
        .submit_feedback(SubmitFeedbackInput {
            customer_id: user.id,
            title: "Great ramen".to_string(),
            rating: Some(5),
            comment: Some("Broth was perfect".to_string()),
            menu_item_id: Some(item.id),
            order_id: None,
            restaurant_id: Some(restaurant.id),
        })
        .await
        .unwrap();
    assert_eq!(feedback.slug, "great-ramen");

    let duplicate_title = app
        .services
        .feedback
        .submit_feedback(SubmitFeedbackInput {
            customer_id: user.id,
            title: "Great ramen".to_string(),
            rating: Some(4),
            comment: None,
            menu_item_id: None,
            order_id: None,
            restaurant_id: Some(restaurant.id),
        })
        .await
        .unwrap();
    assert_eq!(duplicate_title.slug, "great-ramen-2");

    let (entries, total) = app
        .services
        .feedback
        .list_feedback_for_restaurant(restaurant.id, 1, 20)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(entries.len(), 2);
}
