use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use recipebook_core::models::Recipe;

pub(crate) fn print_recipe_table(recipes: &[&Recipe]) {
    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Minutes")]
        minutes: String,
        #[tabled(rename = "Servings")]
        servings: String,
        #[tabled(rename = "Rating")]
        rating: String,
        #[tabled(rename = "Price")]
        price: String,
    }

    let rows: Vec<RecipeRow> = recipes
        .iter()
        .enumerate()
        .map(|(i, r)| RecipeRow {
            idx: i + 1,
            id: r.id,
            title: truncate(&r.title, 40),
            category: r.category().map(|c| truncate(c, 15)).unwrap_or_default(),
            minutes: r.ready_in_minutes.map_or("-".into(), |m| m.to_string()),
            servings: r.servings.map_or("-".into(), |s| s.to_string()),
            rating: r.star_rating().map_or("-".into(), |s| format!("{s:.1}")),
            price: r.price_display().unwrap_or_else(|| "-".into()),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..8)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_recipe_detail(recipe: &Recipe) {
    println!("{} (id: {})", recipe.title, recipe.id);
    if let Some(category) = recipe.category() {
        println!("Category: {category}");
    }

    let mut facts = Vec::new();
    if let Some(minutes) = recipe.ready_in_minutes {
        facts.push(format!("{minutes} min"));
    }
    if let Some(servings) = recipe.servings {
        facts.push(format!("serves {servings}"));
    }
    if let Some(health) = recipe.health_score {
        facts.push(format!("health {health:.0}/100"));
    }
    if let Some(price) = recipe.price_display() {
        facts.push(format!("{price} per serving"));
    }
    if let Some(stars) = recipe.star_rating() {
        facts.push(format!("{stars:.1}/5"));
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" | "));
    }
    if !recipe.diets.is_empty() {
        println!("Diets: {}", recipe.diets.join(", "));
    }

    if let Some(summary) = recipe.plain_summary().filter(|s| !s.is_empty()) {
        println!();
        println!("{summary}");
    }

    if !recipe.ingredients.is_empty() {
        println!();
        println!("Ingredients:");
        for ingredient in &recipe.ingredients {
            println!("  - {}", ingredient.original);
        }
    }

    if !recipe.instructions.is_empty() {
        println!();
        println!("Instructions:");
        for step in &recipe.instructions {
            println!("  {}. {}", step.number, step.step);
        }
    }

    if let Some(url) = recipe.source_url.as_ref().or(recipe.spoonacular_source_url.as_ref()) {
        println!();
        println!("Source: {url}");
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
