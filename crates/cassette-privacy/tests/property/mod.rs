mod sanitizer_properties;
