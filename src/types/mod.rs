pub mod city_selector;
pub mod datasets;
pub mod months;
pub mod page_schema;
pub mod records;
