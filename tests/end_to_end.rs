//! End-to-end command flow over an in-memory database.

use feedtrack::cli::{authenticated, resolve_current_user, Commands};
use feedtrack::{
    AppState, ConfigStore, Database, FeedService, FeedtrackError, SubscriptionService, UserService,
};

async fn setup() -> (AppState, tempfile::TempDir) {
    let db = Database::open_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigStore::open_at(dir.path().join("prefs.json")).unwrap();
    (AppState::new(db, config), dir)
}

#[tokio::test]
async fn register_addfeed_feeds_following_flow() {
    let (mut state, _dir) = setup().await;

    // register("alice")
    UserService::new(&state.db)
        .register(&mut state.config, "alice")
        .await
        .unwrap();
    assert_eq!(state.config.current_user_name(), "alice");

    // addfeed("Blog", "http://x/feed.xml") as the resolved current user
    let user = resolve_current_user(&state).await.unwrap();
    FeedService::new(&state.db)
        .create_feed(&user, "Blog", "http://x/feed.xml")
        .await
        .unwrap();

    // feeds lists one entry owned by alice
    let feeds = FeedService::new(&state.db).list_feeds().await.unwrap();
    assert_eq!(feeds.len(), 1);
    assert_eq!(feeds[0].feed.name, "Blog");
    assert_eq!(feeds[0].creator_name, "alice");

    // following lists Blog
    let follows = SubscriptionService::new(&state.db)
        .list_follows(&user)
        .await
        .unwrap();
    assert_eq!(follows.len(), 1);
    assert_eq!(follows[0].feed_name, "Blog");
    assert_eq!(follows[0].user_name, "alice");
}

#[tokio::test]
async fn following_is_order_independent() {
    let (mut state, _dir) = setup().await;

    UserService::new(&state.db)
        .register(&mut state.config, "alice")
        .await
        .unwrap();
    let user = resolve_current_user(&state).await.unwrap();

    let feeds = FeedService::new(&state.db);
    feeds.create_feed(&user, "News", "http://n/rss").await.unwrap();
    feeds.create_feed(&user, "Blog", "http://b/rss").await.unwrap();

    let mut names: Vec<String> = SubscriptionService::new(&state.db)
        .list_follows(&user)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.feed_name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Blog", "News"]);
}

#[tokio::test]
async fn second_user_follows_and_unfollows_by_url() {
    let (mut state, _dir) = setup().await;

    UserService::new(&state.db)
        .register(&mut state.config, "alice")
        .await
        .unwrap();
    let alice = resolve_current_user(&state).await.unwrap();
    FeedService::new(&state.db)
        .create_feed(&alice, "Blog", "http://x/feed.xml")
        .await
        .unwrap();

    // bob registers and the preference file switches to him
    UserService::new(&state.db)
        .register(&mut state.config, "bob")
        .await
        .unwrap();
    let bob = resolve_current_user(&state).await.unwrap();
    assert_eq!(bob.name, "bob");

    let subs = SubscriptionService::new(&state.db);
    let follow = subs.follow(&bob, "http://x/feed.xml").await.unwrap();
    assert_eq!(follow.feed_name, "Blog");
    assert_eq!(follow.user_name, "bob");

    subs.unfollow(&bob, "http://x/feed.xml").await.unwrap();
    assert!(subs.list_follows(&bob).await.unwrap().is_empty());

    // Unfollowing never deletes the feed or alice's subscription
    assert_eq!(FeedService::new(&state.db).list_feeds().await.unwrap().len(), 1);
    assert_eq!(subs.list_follows(&alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn dispatched_commands_share_the_preference_file() {
    let (mut state, _dir) = setup().await;

    Commands::Register {
        name: "alice".to_string(),
    }
    .execute(&mut state)
    .await
    .unwrap();

    Commands::Addfeed {
        name: "Blog".to_string(),
        url: "http://x/feed.xml".to_string(),
    }
    .execute(&mut state)
    .await
    .unwrap();

    Commands::Login {
        name: "alice".to_string(),
    }
    .execute(&mut state)
    .await
    .unwrap();

    // The middleware resolves the same user the commands acted as
    authenticated(&state, |user| async move {
        assert_eq!(user.name, "alice");
        Ok::<(), FeedtrackError>(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn login_ghost_fails_without_touching_preferences() {
    let (mut state, _dir) = setup().await;

    UserService::new(&state.db)
        .register(&mut state.config, "alice")
        .await
        .unwrap();

    let result = UserService::new(&state.db)
        .login(&mut state.config, "ghost")
        .await;
    assert!(matches!(result, Err(FeedtrackError::UserNotFound(_))));
    assert_eq!(state.config.current_user_name(), "alice");
}
