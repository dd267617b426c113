mod properties;
mod tokenizer;
