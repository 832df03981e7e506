//! Behavioural tests for the type graph against the in-memory directory.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use users_graphql::domain::ports::UserDirectory;
use users_graphql::graphql::{GraphSchema, build_schema};
use users_graphql::test_support::{DirectoryCall, InMemoryDirectory};

struct World {
    directory: Arc<InMemoryDirectory>,
    schema: GraphSchema,
}

impl World {
    async fn run(&self, document: &str) -> (Value, Vec<String>) {
        let response = self.schema.execute(document).await;
        let errors = response.errors.iter().map(|e| e.message.clone()).collect();
        let data = response.data.into_json().expect("data converts to JSON");
        (data, errors)
    }

    async fn run_ok(&self, document: &str) -> Value {
        let (data, errors) = self.run(document).await;
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        data
    }
}

#[fixture]
fn world() -> World {
    let directory = Arc::new(InMemoryDirectory::seeded());
    let port: Arc<dyn UserDirectory> = directory.clone();
    World {
        directory,
        schema: build_schema(port),
    }
}

#[rstest]
#[case::bill("23", "Bill")]
#[case::alex("40", "Alex")]
#[tokio::test]
async fn user_lookup_returns_the_requested_id(
    world: World,
    #[case] id: &str,
    #[case] first_name: &str,
) {
    let data = world
        .run_ok(&format!(r#"{{ user(id: "{id}") {{ id firstName }} }}"#))
        .await;
    assert_eq!(data, json!({"user": {"id": id, "firstName": first_name}}));
}

#[rstest]
#[tokio::test]
async fn unknown_user_is_null(world: World) {
    let data = world.run_ok(r#"{ user(id: "999") { id } }"#).await;
    assert_eq!(data, json!({"user": null}));
}

#[rstest]
#[tokio::test]
async fn nested_company_costs_one_call_each(world: World) {
    let data = world
        .run_ok(r#"{ user(id: "23") { company { name } } }"#)
        .await;

    assert_eq!(data, json!({"user": {"company": {"name": "Apple"}}}));
    assert_eq!(
        world.directory.calls(),
        vec![
            DirectoryCall::User("23".to_owned()),
            DirectoryCall::Company("1".to_owned()),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn company_lists_its_users_and_back(world: World) {
    let data = world
        .run_ok(r#"{ company(id: "2") { name users { firstName company { id } } } }"#)
        .await;

    assert_eq!(
        data,
        json!({"company": {
            "name": "Google",
            "users": [
                {"firstName": "Alex", "company": {"id": "2"}},
                {"firstName": "Nick", "company": {"id": "2"}}
            ]
        }})
    );
}

#[rstest]
#[tokio::test]
async fn user_without_company_skips_the_lookup(world: World) {
    let data = world
        .run_ok(r#"mutation { addUser(firstName: "Stephen", age: 26) { id company { id } } }"#)
        .await;

    assert_eq!(data["addUser"]["company"], Value::Null);
    assert!(
        !world
            .directory
            .calls()
            .iter()
            .any(|call| matches!(call, DirectoryCall::Company(_))),
        "no company fetch expected without a foreign key"
    );
}

#[rstest]
#[case::without_first_name("mutation { addUser(age: 30) { id } }")]
#[case::without_age(r#"mutation { addUser(firstName: "Ann") { id } }"#)]
#[tokio::test]
async fn add_user_requires_first_name_and_age(world: World, #[case] document: &str) {
    let (data, errors) = world.run(document).await;

    assert!(!errors.is_empty(), "validation should reject the document");
    assert_eq!(data, Value::Null);
    assert!(world.directory.calls().is_empty(), "no directory call expected");
}

#[rstest]
#[tokio::test]
async fn add_user_stores_the_company_link(world: World) {
    let data = world
        .run_ok(r#"mutation { addUser(firstName: "Ann", age: 30, companyId: "1") { id company { name } } }"#)
        .await;

    let id = data["addUser"]["id"].as_str().expect("created id").to_owned();
    assert_eq!(data["addUser"]["company"], json!({"name": "Apple"}));
    let stored = world.directory.stored_user(&id).expect("user stored");
    assert_eq!(stored.company_id.as_deref(), Some("1"));
}

#[rstest]
#[tokio::test]
async fn edit_user_updates_only_supplied_fields(world: World) {
    let data = world
        .run_ok(r#"mutation { editUser(id: "23", age: 30) { id firstName age company { id } } }"#)
        .await;

    assert_eq!(
        data,
        json!({"editUser": {"id": "23", "firstName": "Bill", "age": 30, "company": {"id": "1"}}})
    );
}

#[rstest]
#[tokio::test]
async fn delete_user_returns_prior_record_then_null(world: World) {
    let deleted = world
        .run_ok(r#"mutation { deleteUser(id: "23") { id firstName age } }"#)
        .await;
    assert_eq!(
        deleted,
        json!({"deleteUser": {"id": "23", "firstName": "Bill", "age": 20}})
    );

    let after = world.run_ok(r#"{ user(id: "23") { id } }"#).await;
    assert_eq!(after, json!({"user": null}));
}

#[rstest]
#[tokio::test]
async fn failed_mutation_leaves_a_null_field_and_an_error(world: World) {
    let (data, errors) = world
        .run(r#"mutation { editUser(id: "999", age: 1) { id } }"#)
        .await;

    assert_eq!(data, json!({"editUser": null}));
    assert_eq!(errors, vec!["directory record not found: users/999".to_owned()]);
}
