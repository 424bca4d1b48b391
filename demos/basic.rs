//! Basic example demonstrating the Atlassian Cloud client.
//!
//! Run with:
//! ```
//! ATLASSIAN_SITE_URL=https://your-site.atlassian.net \
//! ATLASSIAN_EMAIL=you@example.com ATLASSIAN_API_TOKEN=your-token \
//! cargo run --example basic
//! ```

use atlassapi::jira::{
    FilterApi, FilterService, IssueFieldApi, IssueFieldService, ProjectApi, ProjectSearchOptions,
    ProjectService,
};
use atlassapi::{AtlassianClient, Method};

#[tokio::main]
async fn main() -> atlassapi::Result<()> {
    // Request spans are emitted at debug level
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Creating Atlassian client...");
    let client = AtlassianClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Raw executor access for endpoints without a service
    let request = client.build_empty(Method::Get, "rest/api/3/serverInfo")?;
    let info = client.execute(&request).await?;
    println!("serverInfo -> HTTP {}", info.status);

    // Walk every page of projects
    println!("\n--- Projects ---");
    let projects = ProjectService::new(client.clone());
    let options = ProjectSearchOptions::default();
    let mut start_at = 0;
    loop {
        let page = projects.search(&options, start_at, 25).await?;
        for project in &page.data {
            println!("  - {} {}", project.key, project.name);
        }
        if !page.data.has_more() || page.data.is_empty() {
            break;
        }
        start_at = page.data.next_start_at();
    }

    // Custom fields
    println!("\n--- Custom Fields ---");
    let fields = IssueFieldService::new(client.clone()).gets().await?;
    for field in fields.data.iter().filter(|f| f.custom) {
        println!("  - {} ({})", field.name, field.id);
    }

    // Favourite filters
    println!("\n--- Favourite Filters ---");
    let favourites = FilterService::new(client).favorite().await?;
    for filter in &favourites.data {
        println!("  - #{} {}", filter.id, filter.name);
    }

    println!("\nDone!");
    Ok(())
}
