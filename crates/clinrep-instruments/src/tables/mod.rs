pub mod quotient;
