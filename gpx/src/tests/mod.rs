mod test_validate;
