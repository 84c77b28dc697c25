mod array_text;
mod formatter;
