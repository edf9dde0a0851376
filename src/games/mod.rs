pub mod food_guess;
