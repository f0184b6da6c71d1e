mod account_type_properties;
