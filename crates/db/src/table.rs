use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    Password,
    EmailVerified,
    Bio,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum EmailOtp {
    Table,
    Id,
    UserId,
    Email,
    Code,
    IsVerified,
    CreatedAt,
    ExpiresAt,
}

#[derive(Iden, Clone)]
pub enum Category {
    Table,
    Id,
    Name,
    Slug,
    Description,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum DietaryTag {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Color,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    AuthorId,
    CategoryId,
    Title,
    Slug,
    Description,
    PrepTime,
    CookTime,
    Servings,
    Difficulty,
    Calories,
    IsPublic,
    Views,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeDietaryTag {
    Table,
    RecipeId,
    DietaryTagId,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    RecipeId,
    Name,
    Amount,
    Position,
}

#[derive(Iden, Clone)]
pub enum Instruction {
    Table,
    Id,
    RecipeId,
    StepNumber,
    Description,
}

#[derive(Iden, Clone)]
pub enum Favorite {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Review {
    Table,
    Id,
    RecipeId,
    UserId,
    Rating,
    Comment,
    Reply,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    UserId,
    Name,
    Description,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Meal {
    Table,
    Id,
    MealPlanId,
    RecipeId,
    MealType,
    DayOfWeek,
    Date,
    Servings,
    Notes,
    IsCompleted,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingList {
    Table,
    Id,
    UserId,
    MealPlanId,
    Name,
    Notes,
    IsCompleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingListShare {
    Table,
    ShoppingListId,
    UserId,
}

#[derive(Iden, Clone)]
pub enum ShoppingListItem {
    Table,
    Id,
    ShoppingListId,
    Name,
    Quantity,
    Category,
    IsPurchased,
    IsPriority,
    Notes,
    Position,
    CreatedAt,
}
