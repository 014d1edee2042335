mod widgets_tests;
