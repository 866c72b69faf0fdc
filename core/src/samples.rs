use crate::models::{Ingredient, InstructionStep, Recipe};

fn ingredient(id: i64, name: &str, amount: f64, unit: &str, original: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_string(),
        amount,
        unit: unit.to_string(),
        original: original.to_string(),
    }
}

fn steps(texts: &[&str]) -> Vec<InstructionStep> {
    (1u32..)
        .zip(texts)
        .map(|(number, step)| InstructionStep {
            number,
            step: (*step).to_string(),
        })
        .collect()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Recipes the cache is seeded with at startup, served as the featured list
/// until a search brings in remote results.
#[must_use]
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            summary: Some(
                "A traditional Italian pasta dish with eggs, cheese, and pancetta. Simple yet delicious comfort food that's ready in under 30 minutes."
                    .to_string(),
            ),
            image: Some(
                "https://images.unsplash.com/photo-1621996346565-e3dbc353d2e5?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            ready_in_minutes: Some(25),
            servings: Some(4),
            health_score: Some(72.0),
            price_per_serving: Some(350.0),
            spoonacular_score: Some(85.0),
            aggregate_likes: Some(1247),
            cuisines: tags(&["Italian"]),
            dish_types: tags(&["dinner", "main course"]),
            ingredients: vec![
                ingredient(1, "spaghetti", 400.0, "g", "400g spaghetti pasta"),
                ingredient(2, "pancetta", 150.0, "g", "150g pancetta, diced"),
                ingredient(3, "eggs", 3.0, "large", "3 large eggs"),
                ingredient(4, "parmesan cheese", 100.0, "g", "100g grated Parmesan cheese"),
                ingredient(5, "black pepper", 1.0, "tsp", "1 tsp freshly ground black pepper"),
            ],
            instructions: steps(&[
                "Cook spaghetti in salted boiling water until al dente according to package instructions.",
                "Meanwhile, cook pancetta in a large skillet until crispy, about 5-7 minutes.",
                "In a bowl, whisk together eggs, grated Parmesan, and black pepper.",
                "Drain pasta, reserving 1 cup of pasta water. Add hot pasta to the skillet with pancetta.",
                "Remove from heat and quickly toss with egg mixture, adding pasta water as needed to create a creamy sauce.",
            ]),
            ..Recipe::new(1, "Classic Spaghetti Carbonara")
        },
        Recipe {
            summary: Some(
                "A healthy and trendy breakfast featuring creamy avocado on toasted sourdough topped with a perfectly poached egg."
                    .to_string(),
            ),
            image: Some(
                "https://images.unsplash.com/photo-1525351484163-7529414344d8?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            ready_in_minutes: Some(15),
            servings: Some(2),
            health_score: Some(89.0),
            price_per_serving: Some(280.0),
            spoonacular_score: Some(92.0),
            aggregate_likes: Some(856),
            cuisines: tags(&["American"]),
            dish_types: tags(&["breakfast", "brunch"]),
            diets: tags(&["vegetarian"]),
            ingredients: vec![
                ingredient(6, "sourdough bread", 2.0, "slices", "2 slices sourdough bread"),
                ingredient(7, "avocado", 1.0, "large", "1 large ripe avocado"),
                ingredient(8, "eggs", 2.0, "large", "2 large eggs"),
                ingredient(9, "lemon juice", 1.0, "tbsp", "1 tbsp fresh lemon juice"),
                ingredient(10, "salt", 0.5, "tsp", "Salt and pepper to taste"),
            ],
            instructions: steps(&[
                "Toast sourdough bread slices until golden brown.",
                "Mash avocado with lemon juice, salt, and pepper in a bowl.",
                "Bring water to boil in a pot, create a whirlpool and gently drop in eggs for poaching.",
                "Poach eggs for 3-4 minutes until whites are set but yolks remain runny.",
                "Spread avocado mixture on toast and top with poached eggs.",
            ]),
            ..Recipe::new(2, "Avocado Toast with Poached Egg")
        },
        Recipe {
            summary: Some(
                "Classic homemade chocolate chip cookies that are crispy on the outside and chewy on the inside. Perfect for any occasion!"
                    .to_string(),
            ),
            image: Some(
                "https://images.unsplash.com/photo-1499636136210-6f4ee915583e?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            ready_in_minutes: Some(45),
            servings: Some(24),
            health_score: Some(45.0),
            price_per_serving: Some(65.0),
            spoonacular_score: Some(78.0),
            aggregate_likes: Some(2103),
            cuisines: tags(&["American"]),
            dish_types: tags(&["dessert"]),
            diets: tags(&["vegetarian"]),
            ingredients: vec![
                ingredient(11, "flour", 300.0, "g", "300g all-purpose flour"),
                ingredient(12, "butter", 200.0, "g", "200g unsalted butter, softened"),
                ingredient(13, "brown sugar", 150.0, "g", "150g brown sugar"),
                ingredient(14, "white sugar", 100.0, "g", "100g white sugar"),
                ingredient(15, "chocolate chips", 200.0, "g", "200g chocolate chips"),
            ],
            instructions: steps(&[
                "Preheat oven to 180°C (350°F) and line baking sheets with parchment paper.",
                "Cream together softened butter and both sugars until light and fluffy.",
                "Beat in eggs one at a time, then add vanilla extract.",
                "Gradually mix in flour until just combined, then fold in chocolate chips.",
                "Drop rounded tablespoons of dough onto baking sheets and bake for 10-12 minutes.",
            ]),
            ..Recipe::new(3, "Chocolate Chip Cookies")
        },
    ]
}
